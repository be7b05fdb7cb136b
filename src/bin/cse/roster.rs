use cse_rs::{companies, export};

use crate::{Ctx, progress::Bar, prompt};

pub(crate) async fn run(ctx: &Ctx) -> anyhow::Result<()> {
    match prompt::choose(
        "Company roster",
        &["Fetch every company (A-Z)", "List companies for one letter", "Back"],
    )? {
        0 => fetch_all(ctx).await,
        1 => one_letter(ctx).await,
        _ => Ok(()),
    }
}

async fn fetch_all(ctx: &Ctx) -> anyhow::Result<()> {
    println!("This queries the listing page for every letter A-Z, one request at a time.");
    if !prompt::confirm("Proceed?", false)? {
        return Ok(());
    }

    let mut bar = Bar::new("letters");
    let roster = companies::discover_all_observed(&ctx.client, ctx.settings.delay, &mut bar).await;

    println!(
        "Found {} companies ({} active).",
        roster.companies.len(),
        roster.active().count()
    );
    if !roster.failures.is_empty() {
        let letters: Vec<&str> = roster.failures.iter().map(|f| f.id.as_str()).collect();
        println!("Letters that failed: {}", letters.join(", "));
    }
    if roster.companies.is_empty() {
        return Ok(());
    }

    if prompt::confirm("Save the listing as JSON/CSV?", true)? {
        let prefix = export::timestamped_prefix("cse_companies");
        for outcome in export::write_roster(&ctx.settings.output_dir, &prefix, &roster.companies) {
            print_outcome(&outcome);
        }
    }

    let records = roster.records();
    let target = &ctx.settings.data_file;
    if prompt::confirm(
        &format!("Replace the roster at {} ({} companies)?", target.display(), records.len()),
        false,
    )? {
        companies::universe::save(target, &records)?;
        println!("Roster saved to {}", target.display());
    }
    Ok(())
}

async fn one_letter(ctx: &Ctx) -> anyhow::Result<()> {
    let letter = prompt::letter("Letter")?;
    let listed = companies::by_letter(&ctx.client, letter).await?;
    println!("{} companies under '{letter}':", listed.len());
    for c in &listed {
        println!(
            "  {:<14} {:<50} {}",
            c.symbol.as_deref().unwrap_or("-"),
            c.name.as_deref().unwrap_or("-"),
            c.price.map_or_else(|| "-".to_string(), |p| format!("{p:.2}"))
        );
    }
    Ok(())
}

pub(crate) fn print_outcome(outcome: &export::ArtifactOutcome) {
    match &outcome.result {
        Ok(()) => println!("  saved  {}", outcome.path.display()),
        Err(e) => println!("  FAILED {} ({e})", outcome.path.display()),
    }
}
