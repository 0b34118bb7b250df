use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tracing::warn;

use crate::domain::models::program::Program;
use crate::domain::models::session::SessionStart;
use crate::domain::ports::{ProgramRepository, SessionRepository};
use crate::error::AppError;

pub struct ProgramPage {
    pub programs: Vec<Program>,
    pub has_more: bool,
}

/// Public program listing: display programs derived from published upcoming
/// sessions (children rolled up to their parent), merged with programs whose
/// details live on an external site, ordered and paginated.
pub async fn get_public_programs(
    program_repo: &dyn ProgramRepository,
    session_repo: &dyn SessionRepository,
    today: NaiveDate,
    offset: usize,
    limit: usize,
) -> Result<ProgramPage, AppError> {
    let external = program_repo.list_external().await?;
    let starts = session_repo.list_published_upcoming_starts(today).await?;

    let mut seen = HashSet::new();
    let program_ids: Vec<String> = starts
        .iter()
        .filter(|s| seen.insert(s.program_id.clone()))
        .map(|s| s.program_id.clone())
        .collect();

    let session_programs = if program_ids.is_empty() {
        Vec::new()
    } else {
        program_repo.list_by_ids(&program_ids).await?
    };

    let mut parent_seen = HashSet::new();
    let parent_ids: Vec<String> = session_programs
        .iter()
        .filter_map(|p| p.parent_id.clone())
        .filter(|id| parent_seen.insert(id.clone()))
        .collect();

    let parents = if parent_ids.is_empty() {
        Vec::new()
    } else {
        program_repo.list_by_ids(&parent_ids).await?
    };

    // Rollup is one hop: a parent that is itself a child means the data holds
    // a deeper chain than the listing resolves.
    for parent in &parents {
        if parent.parent_id.is_some() {
            warn!(program_id = %parent.id, "parent program has a parent of its own; rollup only resolves one level");
        }
    }

    let ordered = order_display_programs(&starts, &session_programs, &parents, external);
    Ok(paginate(ordered, offset, limit))
}

/// Order the combined listing: session-linked display programs with a known
/// earliest start first (by date, name tiebreak), then session-linked
/// programs without a date (by name), then external programs (by name),
/// de-duplicated by id with the first occurrence winning.
pub fn order_display_programs(
    starts: &[SessionStart],
    session_programs: &[Program],
    parents: &[Program],
    external: Vec<Program>,
) -> Vec<Program> {
    // Ascending by start date, nulls after any real date. The sort is stable,
    // so the first row seen per program carries its earliest date.
    let mut sorted_starts: Vec<&SessionStart> = starts.iter().collect();
    sorted_starts.sort_by(|a, b| match (a.start_date, b.start_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let mut earliest: HashMap<&str, Option<NaiveDate>> = HashMap::new();
    for start in &sorted_starts {
        earliest.entry(&start.program_id).or_insert(start.start_date);
    }

    let parent_map: HashMap<&str, &Program> =
        parents.iter().map(|p| (p.id.as_str(), p)).collect();

    // Roll each session-linked program up to its display program, keeping the
    // earliest start across every contributor (none counts as "infinitely late").
    let mut display: HashMap<String, Program> = HashMap::new();
    let mut display_earliest: HashMap<String, Option<NaiveDate>> = HashMap::new();

    for program in session_programs {
        let display_program = program
            .parent_id
            .as_deref()
            .and_then(|pid| parent_map.get(pid).copied())
            .unwrap_or(program);

        let contributed = earliest.get(program.id.as_str()).copied().flatten();
        let entry = display_earliest
            .entry(display_program.id.clone())
            .or_insert(None);
        *entry = match (*entry, contributed) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, b) => b,
        };

        display
            .entry(display_program.id.clone())
            .or_insert_with(|| display_program.clone());
    }

    let mut dated: Vec<(NaiveDate, Program)> = Vec::new();
    let mut undated: Vec<Program> = Vec::new();

    for (id, program) in display {
        match display_earliest.get(&id).copied().flatten() {
            Some(date) => dated.push((date, program)),
            None => undated.push(program),
        }
    }

    dated.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.name.cmp(&b.1.name)));
    undated.sort_by(|a, b| a.name.cmp(&b.name));

    let mut external = external;
    external.sort_by(|a, b| a.name.cmp(&b.name));

    let mut emitted = HashSet::new();
    let mut ordered = Vec::new();
    for program in dated
        .into_iter()
        .map(|(_, p)| p)
        .chain(undated)
        .chain(external)
    {
        if emitted.insert(program.id.clone()) {
            ordered.push(program);
        }
    }

    ordered
}

pub fn paginate(ordered: Vec<Program>, offset: usize, limit: usize) -> ProgramPage {
    // offset comes straight from a query parameter and can be huge.
    let has_more = offset.saturating_add(limit) < ordered.len();
    let programs = ordered
        .into_iter()
        .skip(offset)
        .take(limit)
        .collect();

    ProgramPage { programs, has_more }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(id: &str, name: &str) -> Program {
        let mut p = Program::new(name.to_string(), crate::domain::services::slug::slugify(name));
        p.id = id.to_string();
        p
    }

    fn child(id: &str, name: &str, parent_id: &str) -> Program {
        let mut p = program(id, name);
        p.parent_id = Some(parent_id.to_string());
        p
    }

    fn start(program_id: &str, date: Option<&str>) -> SessionStart {
        SessionStart {
            program_id: program_id.to_string(),
            start_date: date.map(|d| d.parse().unwrap()),
        }
    }

    #[test]
    fn orders_dated_programs_by_earliest_start_then_name() {
        let starts = vec![
            start("b", Some("2026-09-20")),
            start("a", Some("2026-09-10")),
            start("c", Some("2026-09-10")),
        ];
        let programs = vec![program("a", "Yoga"), program("b", "Meditation"), program("c", "Breathwork")];

        let ordered = order_display_programs(&starts, &programs, &[], vec![]);
        let names: Vec<&str> = ordered.iter().map(|p| p.name.as_str()).collect();

        // Equal dates break ties alphabetically.
        assert_eq!(names, vec!["Breathwork", "Yoga", "Meditation"]);
    }

    #[test]
    fn no_sessions_and_no_external_programs_means_empty_listing() {
        let ordered = order_display_programs(&[], &[], &[], vec![]);
        assert!(ordered.is_empty());
    }

    #[test]
    fn child_sessions_roll_up_to_parent() {
        let parent = program("pa", "Hatha Yoga");
        let kid = child("ch", "Hatha Yoga Weekend", "pa");

        let starts = vec![start("ch", Some("2026-10-01"))];
        let ordered = order_display_programs(&starts, &[kid], &[parent], vec![]);

        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].id, "pa");
    }

    #[test]
    fn parent_earliest_start_is_min_across_children_and_self() {
        let parent = program("pa", "Hatha Yoga");
        let kid = child("ch", "Hatha Yoga Weekend", "pa");
        let other = program("ot", "Aumkar");

        // Parent's own session is later than the child's; the child's date wins.
        let starts = vec![
            start("pa", Some("2026-12-01")),
            start("ch", Some("2026-10-01")),
            start("ot", Some("2026-11-01")),
        ];
        let parent_as_linked = parent.clone();
        let ordered = order_display_programs(
            &starts,
            &[kid, parent_as_linked, other],
            &[parent],
            vec![],
        );

        let ids: Vec<&str> = ordered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["pa", "ot"]);
    }

    #[test]
    fn null_start_dates_sort_after_dated_programs() {
        let starts = vec![start("a", None), start("b", Some("2026-09-01"))];
        let programs = vec![program("a", "Aum"), program("b", "Zen")];

        let ordered = order_display_programs(&starts, &programs, &[], vec![]);
        let ids: Vec<&str> = ordered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn a_dated_session_beats_an_earlier_null_for_the_same_program() {
        let starts = vec![start("a", None), start("a", Some("2026-09-05"))];
        let programs = vec![program("a", "Aum"), program("b", "Zen")];
        let starts_b = start("b", Some("2026-09-01"));
        let mut all = starts;
        all.push(starts_b);

        let ordered = order_display_programs(&all, &programs, &[], vec![]);
        let ids: Vec<&str> = ordered.iter().map(|p| p.id.as_str()).collect();
        // "a" has a real date (2026-09-05), so it sorts among the dated group.
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn external_programs_append_after_session_programs_sorted_by_name() {
        let starts = vec![start("a", Some("2026-09-10"))];
        let session_programs = vec![program("a", "Zen")];
        let mut e1 = program("e1", "Bhuta Shuddhi");
        e1.details_external = true;
        let mut e2 = program("e2", "Angamardana");
        e2.details_external = true;

        let ordered = order_display_programs(&starts, &session_programs, &[], vec![e1, e2]);
        let names: Vec<&str> = ordered.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Zen", "Angamardana", "Bhuta Shuddhi"]);
    }

    #[test]
    fn program_both_session_linked_and_external_appears_once() {
        let starts = vec![start("a", Some("2026-09-10"))];
        let mut linked = program("a", "Zen");
        linked.details_external = true;

        let ordered =
            order_display_programs(&starts, &[linked.clone()], &[], vec![linked]);
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].id, "a");
    }

    #[test]
    fn pagination_reports_has_more_only_past_the_end() {
        let programs: Vec<Program> = (0..7)
            .map(|i| program(&format!("p{i}"), &format!("Program {i}")))
            .collect();

        let page = paginate(programs.clone(), 0, 6);
        assert_eq!(page.programs.len(), 6);
        assert!(page.has_more);

        let page = paginate(programs[..6].to_vec(), 0, 6);
        assert_eq!(page.programs.len(), 6);
        assert!(!page.has_more);

        let page = paginate(programs, 6, 6);
        assert_eq!(page.programs.len(), 1);
        assert!(!page.has_more);
    }

    #[test]
    fn offsets_near_usize_max_yield_an_empty_page() {
        let page = paginate(Vec::new(), usize::MAX, 6);
        assert!(page.programs.is_empty());
        assert!(!page.has_more);

        let programs: Vec<Program> = (0..3)
            .map(|i| program(&format!("p{i}"), &format!("Program {i}")))
            .collect();
        let page = paginate(programs, usize::MAX, 6);
        assert!(page.programs.is_empty());
        assert!(!page.has_more);
    }
}
