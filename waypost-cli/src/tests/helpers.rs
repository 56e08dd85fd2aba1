//! Stub engine factory and output helpers shared by the CLI tests.

use super::*;
use geo::Coord;
use std::{cell::RefCell, sync::Arc};
use waypost_engine::{
    LanguageCandidate, PoiCandidate,
    test_support::{StubGeoSearch, StubKnowledgeBase},
};

pub(super) const MAN_MO: Coord<f64> = Coord {
    x: 114.1504,
    y: 22.2839,
};

/// Builds engines over in-memory providers and records the endpoints asked
/// for.
#[derive(Debug)]
pub(super) struct StubEngineFactory {
    pub(super) geo_search: Arc<StubGeoSearch>,
    pub(super) knowledge_base: Arc<StubKnowledgeBase>,
    pub(super) endpoints: RefCell<Vec<Endpoints>>,
}

impl StubEngineFactory {
    pub(super) fn new(geo_search: StubGeoSearch, knowledge_base: StubKnowledgeBase) -> Self {
        Self {
            geo_search: Arc::new(geo_search),
            knowledge_base: Arc::new(knowledge_base),
            endpoints: RefCell::new(Vec::new()),
        }
    }
}

impl EngineFactory for StubEngineFactory {
    fn build(&self, endpoints: &Endpoints) -> Result<Engine, CliError> {
        self.endpoints.borrow_mut().push(endpoints.clone());
        Ok(Engine::builder(self.geo_search.clone(), self.knowledge_base.clone()).build())
    }
}

pub(super) fn man_mo_article() -> LanguageCandidate {
    LanguageCandidate::new("en", "Man Mo Temple", "A temple on Hollywood Road.")
        .with_description("Temple in Sheung Wan, Hong Kong")
        .with_page_url("https://en.wikipedia.org/wiki/Man_Mo_Temple")
}

pub(super) fn man_mo_poi(origin: Coord<f64>) -> PoiCandidate {
    PoiCandidate::new("Man Mo Temple", MAN_MO, origin)
}

pub(super) fn parse_output(buffer: &[u8]) -> serde_json::Value {
    let text = String::from_utf8(buffer.to_vec()).expect("stdout utf-8");
    assert!(text.ends_with('\n'), "output should end with a newline");
    serde_json::from_str(&text).expect("output should be JSON")
}
