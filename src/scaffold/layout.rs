use crate::api::types::ProblemDescription;
use crate::config::Layout;
use crate::error::{Result, ScaffoldError};

/// Where a problem lives relative to the output root, and the stem of its code file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemLocation {
    pub components: Vec<String>,
    pub code_stem: String,
}

pub fn locate(problem: &ProblemDescription, layout: Layout) -> Result<ProblemLocation> {
    let location = match layout {
        Layout::Name => by_name(problem)?,
        Layout::Url => by_url(problem)?,
    };
    for component in &location.components {
        check_component(component)?;
    }
    check_component(&location.code_stem)?;
    Ok(location)
}

/// `{site}/{contest}/{name}`, contest being the group tokens from the third onward.
fn by_name(problem: &ProblemDescription) -> Result<ProblemLocation> {
    let tokens: Vec<&str> = problem.group.split(' ').collect();
    let site = site_of(&tokens)?;

    if tokens.len() < 3 {
        return Err(ScaffoldError::invalid(format!(
            "group '{}' has no contest name",
            problem.group
        )));
    }
    let contest = tokens[2..].join(" ");

    // "C1. Tiles" -> "C1"
    let first = problem.name.split(' ').next().unwrap_or_default();
    let mut chars = first.chars();
    chars.next_back();
    let code_stem = chars.as_str().to_string();

    Ok(ProblemLocation {
        components: vec![site, contest, problem.name.clone()],
        code_stem,
    })
}

/// `{site}/{contest}` with contest and code stem taken from the URL path.
fn by_url(problem: &ProblemDescription) -> Result<ProblemLocation> {
    let tokens: Vec<&str> = problem.group.split(' ').collect();
    let site = site_of(&tokens)?;

    let segments = url_segments(&problem.url);
    if segments.len() < 3 {
        return Err(ScaffoldError::invalid(format!(
            "url '{}' has too few path segments",
            problem.url
        )));
    }
    let contest = segments[segments.len() - 3].to_string();
    let code_stem = segments[segments.len() - 1].to_string();

    Ok(ProblemLocation {
        components: vec![site, contest],
        code_stem,
    })
}

fn site_of(tokens: &[&str]) -> Result<String> {
    match tokens.first() {
        Some(site) if !site.is_empty() => Ok(site.to_string()),
        _ => Err(ScaffoldError::invalid("group has no site name")),
    }
}

fn url_segments(url: &str) -> Vec<&str> {
    let url = url.split(['?', '#']).next().unwrap_or_default();
    let path = match url.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, path)| path).unwrap_or_default(),
        None => url,
    };
    path.split('/').filter(|s| !s.is_empty()).collect()
}

// Keeps every derived path under the root
fn check_component(component: &str) -> Result<()> {
    if component.trim().is_empty() {
        return Err(ScaffoldError::invalid("empty path component"));
    }
    if component == "." || component == ".." || component.contains(std::path::is_separator) {
        return Err(ScaffoldError::invalid(format!(
            "'{}' is not a usable path component",
            component
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(name: &str, group: &str, url: &str) -> ProblemDescription {
        ProblemDescription {
            name: name.to_string(),
            group: group.to_string(),
            url: url.to_string(),
            memory_limit: 256,
            time_limit: 1000,
            tests: Vec::new(),
        }
    }

    #[test]
    fn test_name_layout_splits_group() {
        let p = problem("A. Two Buttons", "Codeforces Div2 Round 900", "");
        let loc = locate(&p, Layout::Name).unwrap();
        assert_eq!(loc.components, vec!["Codeforces", "Round 900", "A. Two Buttons"]);
        assert_eq!(loc.code_stem, "A");
    }

    #[test]
    fn test_name_layout_companion_group() {
        let p = problem(
            "C1. Make Nonzero Sum (easy version)",
            "Codeforces - Codeforces Round 829 (Div. 2)",
            "",
        );
        let loc = locate(&p, Layout::Name).unwrap();
        assert_eq!(loc.components[0], "Codeforces");
        assert_eq!(loc.components[1], "Codeforces Round 829 (Div. 2)");
        assert_eq!(loc.code_stem, "C1");
    }

    #[test]
    fn test_name_layout_strips_exactly_one_char() {
        let p = problem("C1.", "Codeforces - Round", "");
        assert_eq!(locate(&p, Layout::Name).unwrap().code_stem, "C1");

        let p = problem("Bé:", "AtCoder - ABC 300", "");
        assert_eq!(locate(&p, Layout::Name).unwrap().code_stem, "Bé");
    }

    #[test]
    fn test_name_layout_rejects_short_group() {
        let p = problem("A.", "Codeforces Round", "");
        let err = locate(&p, Layout::Name).unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidProblem(_)));
    }

    #[test]
    fn test_name_layout_rejects_empty_stem() {
        let p = problem("A", "Codeforces - Round 1", "");
        assert!(locate(&p, Layout::Name).is_err());
    }

    #[test]
    fn test_rejects_empty_site() {
        let p = problem("A.", " - Round 1", "");
        assert!(locate(&p, Layout::Name).is_err());
    }

    #[test]
    fn test_rejects_traversal() {
        let p = problem("A.", "Codeforces - ..", "");
        assert!(locate(&p, Layout::Name).is_err());

        let p = problem("A/B.", "Codeforces - Round 1", "");
        assert!(locate(&p, Layout::Name).is_err());
    }

    #[test]
    fn test_url_layout() {
        let p = problem(
            "A. Watermelon",
            "Codeforces - Beta Round 4",
            "https://codeforces.com/contest/1862/problem/A",
        );
        let loc = locate(&p, Layout::Url).unwrap();
        assert_eq!(loc.components, vec!["Codeforces", "1862"]);
        assert_eq!(loc.code_stem, "A");
    }

    #[test]
    fn test_url_layout_ignores_query_and_trailing_slash() {
        let p = problem(
            "B.",
            "Codeforces",
            "https://codeforces.com/contest/1900/problem/B/?locale=en#statement",
        );
        let loc = locate(&p, Layout::Url).unwrap();
        assert_eq!(loc.components, vec!["Codeforces", "1900"]);
        assert_eq!(loc.code_stem, "B");
    }

    #[test]
    fn test_url_layout_rejects_short_path() {
        let p = problem("A.", "Codeforces", "https://codeforces.com/problem");
        assert!(locate(&p, Layout::Url).is_err());
        let p = problem("A.", "Codeforces", "");
        assert!(locate(&p, Layout::Url).is_err());
    }
}
