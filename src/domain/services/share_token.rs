use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::ports::{ProgramRepository, VenueRepository};
use crate::error::AppError;

/// A share token has the shape `{programSlug}-{citySlug}-{venueSlug}-{YYYY-MM-DD}`.
/// Each slug segment may itself contain hyphens, so the split points are
/// ambiguous; the resolver enumerates the candidates and lets the known slugs
/// in the database pick the intended reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedToken {
    pub rest: String,
    pub separators: Vec<usize>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareTarget {
    pub program_slug: String,
    pub city_slug: String,
    pub venue_slug: String,
    pub date: NaiveDate,
}

/// Split the token into the slug-composite prefix and a validated trailing
/// date. Returns `None` for anything that cannot possibly resolve, which the
/// caller turns into a redirect to the default listing.
pub fn parse_token(token: &str) -> Option<ParsedToken> {
    let token = token.trim();
    if !token.is_ascii() || token.len() < 12 {
        return None;
    }

    let (rest_and_dash, date_part) = token.split_at(token.len() - 10);
    if !rest_and_dash.ends_with('-') {
        return None;
    }
    let date = parse_iso_date(date_part)?;

    let rest = &rest_and_dash[..rest_and_dash.len() - 1];
    let separators: Vec<usize> = rest
        .bytes()
        .enumerate()
        .filter(|(_, b)| *b == b'-')
        .map(|(i, _)| i)
        .collect();

    // Need at least program-city-venue, i.e. two split points.
    if separators.len() < 2 {
        return None;
    }

    Some(ParsedToken {
        rest: rest.to_string(),
        separators,
        date,
    })
}

/// Strict `YYYY-MM-DD` with real calendar validation (rejects 2024-02-30).
fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    for (i, b) in bytes.iter().enumerate() {
        if i != 4 && i != 7 && !b.is_ascii_digit() {
            return None;
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Every prefix of `rest` ending at a separator is a possible program slug.
pub fn candidate_program_slugs(parsed: &ParsedToken) -> Vec<String> {
    let mut seen = HashSet::new();
    parsed
        .separators
        .iter()
        .map(|&i| &parsed.rest[..i])
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_string()))
        .map(|s| s.to_string())
        .collect()
}

/// Every suffix of `rest` starting after a separator is a possible venue slug.
pub fn candidate_venue_slugs(parsed: &ParsedToken) -> Vec<String> {
    let mut seen = HashSet::new();
    parsed
        .separators
        .iter()
        .map(|&i| &parsed.rest[i + 1..])
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_string()))
        .map(|s| s.to_string())
        .collect()
}

/// Pick the split whose program and venue slugs are both verified to exist,
/// preferring the longest combined match. Ties keep the first candidate in
/// enumeration order of the separator pairs.
pub fn best_match(
    parsed: &ParsedToken,
    program_slugs: &HashSet<String>,
    venue_slugs: &HashSet<String>,
) -> Option<ShareTarget> {
    let rest = parsed.rest.as_str();
    let mut best: Option<(usize, ShareTarget)> = None;

    for (a, &i) in parsed.separators.iter().enumerate() {
        let program_slug = &rest[..i];
        if !program_slugs.contains(program_slug) {
            continue;
        }

        for &j in &parsed.separators[a + 1..] {
            let city_slug = &rest[i + 1..j];
            let venue_slug = &rest[j + 1..];
            if city_slug.is_empty() || venue_slug.is_empty() {
                continue;
            }
            if !venue_slugs.contains(venue_slug) {
                continue;
            }

            let score = program_slug.len() + venue_slug.len();
            if best.as_ref().is_none_or(|(s, _)| score > *s) {
                best = Some((
                    score,
                    ShareTarget {
                        program_slug: program_slug.to_string(),
                        city_slug: city_slug.to_string(),
                        venue_slug: venue_slug.to_string(),
                        date: parsed.date,
                    },
                ));
            }
        }
    }

    best.map(|(_, target)| target)
}

/// Full resolution: parse, verify candidate slugs against the database (the
/// two existence checks are independent and run concurrently), disambiguate.
pub async fn resolve_share_token(
    program_repo: &dyn ProgramRepository,
    venue_repo: &dyn VenueRepository,
    token: &str,
) -> Result<Option<ShareTarget>, AppError> {
    let Some(parsed) = parse_token(token) else {
        return Ok(None);
    };

    let program_candidates = candidate_program_slugs(&parsed);
    let venue_candidates = candidate_venue_slugs(&parsed);
    if program_candidates.is_empty() || venue_candidates.is_empty() {
        return Ok(None);
    }

    let (existing_programs, existing_venues) = tokio::try_join!(
        program_repo.filter_existing_slugs(&program_candidates),
        venue_repo.filter_existing_slugs(&venue_candidates),
    )?;

    let program_set: HashSet<String> = existing_programs.into_iter().collect();
    let venue_set: HashSet<String> = existing_venues.into_iter().collect();

    Ok(best_match(&parsed, &program_set, &venue_set))
}
