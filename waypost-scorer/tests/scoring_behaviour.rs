//! Behavioural coverage for accepting and rejecting knowledge-base articles.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use waypost_core::{LanguageCandidate, MatchScore, Query};
use waypost_scorer::MatchScorer;

#[fixture]
fn scorer() -> MatchScorer {
    MatchScorer::default()
}

#[fixture]
fn query() -> RefCell<Option<Query>> {
    RefCell::new(None)
}

#[fixture]
fn candidate() -> RefCell<Option<LanguageCandidate>> {
    RefCell::new(None)
}

#[fixture]
fn score() -> RefCell<Option<MatchScore>> {
    RefCell::new(None)
}

fn recorded(score: &RefCell<Option<MatchScore>>) -> MatchScore {
    score
        .borrow()
        .unwrap_or_else(|| panic!("score must be recorded"))
}

#[given("the query \"Congregation Sherith Israel\" without a location hint")]
fn congregation_query(#[from(query)] query: &RefCell<Option<Query>>) {
    *query.borrow_mut() = Some(Query::new("Congregation Sherith Israel"));
}

#[given("the query \"banque\" without a location hint")]
fn bank_query(#[from(query)] query: &RefCell<Option<Query>>) {
    *query.borrow_mut() = Some(Query::new("banque"));
}

#[given("an English article titled \"Shearith Israel\" describing a synagogue")]
fn synagogue_article(#[from(candidate)] candidate: &RefCell<Option<LanguageCandidate>>) {
    *candidate.borrow_mut() = Some(
        LanguageCandidate::new(
            "en",
            "Shearith Israel",
            "Congregation Shearith Israel is the oldest Jewish congregation in the United States.",
        )
        .with_description("Synagogue in Manhattan, New York City"),
    );
}

#[given("a French article titled \"Banque\" describing a Buddhist temple")]
fn temple_article(#[from(candidate)] candidate: &RefCell<Option<LanguageCandidate>>) {
    *candidate.borrow_mut() = Some(
        LanguageCandidate::new("fr", "Banque", "Temple bouddhiste du quartier.")
            .with_description("Buddhist temple"),
    );
}

#[when("the article is scored")]
fn score_article(
    #[from(scorer)] scorer: MatchScorer,
    #[from(query)] query: &RefCell<Option<Query>>,
    #[from(candidate)] candidate: &RefCell<Option<LanguageCandidate>>,
    #[from(score)] score: &RefCell<Option<MatchScore>>,
) {
    let query = query.borrow();
    let candidate = candidate.borrow();
    let (Some(query), Some(candidate)) = (query.as_ref(), candidate.as_ref()) else {
        panic!("query and candidate must be set");
    };
    *score.borrow_mut() = Some(scorer.score(query, candidate, None));
}

#[then("the geographic weight is zero")]
fn geographic_weight_zero(#[from(score)] score: &RefCell<Option<MatchScore>>) {
    let weight = recorded(score).weights.geographic;
    assert!(weight <= 0.0, "geographic weight was {weight}");
}

#[then("the semantic score is at least 0.87")]
fn semantic_high(#[from(score)] score: &RefCell<Option<MatchScore>>) {
    let semantic = recorded(score).semantic;
    assert!(semantic >= 0.87, "semantic was {semantic}");
}

#[then("the article is accepted")]
fn accepted(#[from(score)] score: &RefCell<Option<MatchScore>>) {
    let outcome = recorded(score);
    assert!(outcome.accepted, "{outcome:?}");
}

#[then("the type score is at most the guard floor")]
fn type_low(
    #[from(scorer)] scorer: MatchScorer,
    #[from(score)] score: &RefCell<Option<MatchScore>>,
) {
    let type_match = recorded(score).type_match;
    assert!(type_match <= scorer.config().type_guard_floor, "type was {type_match}");
}

#[then("the article is rejected")]
fn rejected(#[from(score)] score: &RefCell<Option<MatchScore>>) {
    let outcome = recorded(score);
    assert!(!outcome.accepted, "{outcome:?}");
}

#[scenario(path = "tests/features/scoring.feature", index = 0)]
fn congregation_spelling_variants(
    scorer: MatchScorer,
    query: RefCell<Option<Query>>,
    candidate: RefCell<Option<LanguageCandidate>>,
    score: RefCell<Option<MatchScore>>,
) {
    let _ = (scorer, query, candidate, score);
}

#[scenario(path = "tests/features/scoring.feature", index = 1)]
fn bank_rejects_temple(
    scorer: MatchScorer,
    query: RefCell<Option<Query>>,
    candidate: RefCell<Option<LanguageCandidate>>,
    score: RefCell<Option<MatchScore>>,
) {
    let _ = (scorer, query, candidate, score);
}
