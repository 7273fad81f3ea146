use assert_matches::assert_matches;

use pokedex_browser::domain::{Category, CategoryFilter, Region, RegionFilter};
use pokedex_browser::error::DexError;
use pokedex_browser::tui::{TuiCommand, complete_line, parse_command};

#[test]
fn bare_word_is_a_search() {
    assert_eq!(
        parse_command("Pikachu").unwrap(),
        TuiCommand::Search("Pikachu".to_string())
    );
    assert_eq!(
        parse_command("search mr mime").unwrap(),
        TuiCommand::Search("mr mime".to_string())
    );
}

#[test]
fn filter_takes_category_then_region() {
    assert_eq!(
        parse_command("filter fire kanto").unwrap(),
        TuiCommand::Filter(
            CategoryFilter::Only(Category::Fire),
            RegionFilter::Only(Region::Kanto)
        )
    );
    assert_eq!(
        parse_command("f water").unwrap(),
        TuiCommand::Filter(CategoryFilter::Only(Category::Water), RegionFilter::Any)
    );
    assert_eq!(
        parse_command("filter").unwrap(),
        TuiCommand::Filter(CategoryFilter::Any, RegionFilter::Any)
    );
}

#[test]
fn lone_region_filters_by_region_only() {
    assert_eq!(
        parse_command("filter Johto").unwrap(),
        TuiCommand::Filter(CategoryFilter::Any, RegionFilter::Only(Region::Johto))
    );
}

#[test]
fn unknown_region_means_any() {
    assert_eq!(
        parse_command("filter any atlantis").unwrap(),
        TuiCommand::Filter(CategoryFilter::Any, RegionFilter::Any)
    );
}

#[test]
fn unknown_category_is_rejected() {
    assert_matches!(
        parse_command("filter plasma"),
        Err(DexError::InvalidCategory(_))
    );
}

#[test]
fn control_commands() {
    assert_eq!(parse_command("reset").unwrap(), TuiCommand::Reset);
    assert_eq!(parse_command("m").unwrap(), TuiCommand::More);
    assert_eq!(parse_command("q").unwrap(), TuiCommand::Quit);
    assert_matches!(parse_command("   "), Err(DexError::InvalidCommand(_)));
    assert_matches!(parse_command("catch them all"), Err(DexError::InvalidCommand(_)));
}

#[test]
fn completes_commands_categories_and_regions() {
    assert_eq!(complete_line("fil").as_deref(), Some("filter "));
    assert_eq!(complete_line("filter fi").as_deref(), Some("filter fire"));
    assert_eq!(complete_line("filter fire ka").as_deref(), Some("filter fire kanto"));
    assert_eq!(complete_line("filter zz"), None);
    assert_eq!(complete_line(""), None);
}
