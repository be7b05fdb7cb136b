use std::time::Duration;

use tracing::info;

use crate::{
    companies::model::{ListedCompany, Roster},
    core::{CseClient, CseError, net},
    fetch::{self, FetchObserver},
};

const ENDPOINT: &str = "alphabetical";
const KEY: &str = "reqAlphabetical";

pub(super) async fn by_letter(client: &CseClient, letter: char) -> Result<Vec<ListedCompany>, CseError> {
    if !letter.is_ascii_alphabetic() {
        return Err(CseError::InvalidParams(format!(
            "expected a letter A-Z, got `{letter}`"
        )));
    }
    let alphabet = letter.to_ascii_uppercase().to_string();

    let resp = net::call(client, ENDPOINT, &[("alphabet", alphabet.as_str())]).await?;
    let endpoint = resp.endpoint.clone();

    resp.into_payload(KEY)
        .into_list()
        .ok_or(CseError::MissingData {
            endpoint,
            key: KEY.to_string(),
        })
}

pub(super) async fn discover_all<O: FetchObserver + ?Sized>(
    client: &CseClient,
    delay: Duration,
    observer: &mut O,
) -> Roster {
    let letters: Vec<char> = ('A'..='Z').collect();
    let outcome = fetch::fetch_all_observed(letters, delay, observer, |letter| {
        by_letter(client, letter)
    })
    .await;

    let roster = Roster {
        companies: outcome.records.into_iter().flatten().collect(),
        failures: outcome.failures,
    };

    info!(
        total = roster.companies.len(),
        active = roster.active().count(),
        failed_letters = roster.failures.len(),
        "alphabetical discovery finished"
    );

    roster
}
