use std::time::Duration;

use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};

pub(crate) fn choose(prompt: &str, items: &[&str]) -> anyhow::Result<usize> {
    Ok(Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?)
}

pub(crate) fn confirm(prompt: &str, default: bool) -> anyhow::Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Free text; empty input is allowed and returned trimmed.
pub(crate) fn text(prompt: &str) -> anyhow::Result<String> {
    let s: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(s.trim().to_string())
}

pub(crate) fn date(prompt: &str) -> anyhow::Result<NaiveDate> {
    let s: String = Input::new()
        .with_prompt(format!("{prompt} (YYYY-MM-DD)"))
        .validate_with(|input: &String| -> Result<(), String> {
            NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
                .map(|_| ())
                .map_err(|_| "use the YYYY-MM-DD format".to_string())
        })
        .interact_text()?;
    Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
}

pub(crate) fn letter(prompt: &str) -> anyhow::Result<char> {
    let s: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), String> {
            let t = input.trim();
            if t.len() == 1 && t.chars().all(|c| c.is_ascii_alphabetic()) {
                Ok(())
            } else {
                Err("enter a single letter A-Z".to_string())
            }
        })
        .interact_text()?;
    Ok(s.trim().chars().next().unwrap_or('A').to_ascii_uppercase())
}

/// A positive count, or `None` for an empty answer or `all`.
pub(crate) fn count(prompt: &str) -> anyhow::Result<Option<usize>> {
    let s: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(|input: &String| parse_count(input).map(|_| ()))
        .interact_text()?;
    parse_count(&s).map_err(anyhow::Error::msg)
}

/// A delay in milliseconds; zero disables the pause, empty keeps `default`.
pub(crate) fn millis(prompt: &str, default: Duration) -> anyhow::Result<Duration> {
    let s: String = Input::new()
        .with_prompt(format!("{prompt} (empty for {} ms)", default.as_millis()))
        .allow_empty(true)
        .validate_with(|input: &String| parse_millis(input).map(|_| ()))
        .interact_text()?;
    Ok(parse_millis(&s)
        .map_err(anyhow::Error::msg)?
        .unwrap_or(default))
}

fn parse_count(input: &str) -> Result<Option<usize>, String> {
    let t = input.trim();
    if t.is_empty() || t.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    match t.parse::<usize>() {
        Ok(0) => Err("the count must be at least 1".to_string()),
        Ok(n) => Ok(Some(n)),
        Err(_) => Err("enter a number, `all`, or nothing".to_string()),
    }
}

fn parse_millis(input: &str) -> Result<Option<Duration>, String> {
    let t = input.trim();
    if t.is_empty() {
        return Ok(None);
    }
    t.parse::<u64>()
        .map(|ms| Some(Duration::from_millis(ms)))
        .map_err(|_| "enter a whole number of milliseconds".to_string())
}

/// Comma-separated list, blanks removed.
pub(crate) fn list(prompt: &str) -> anyhow::Result<Vec<String>> {
    Ok(text(prompt)?
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}
