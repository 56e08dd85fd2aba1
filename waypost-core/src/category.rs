//! Categories describing what kind of place a POI is.
//!
//! Categories are detected from free text using a multilingual table of type
//! terms, so the same enum classifies both user queries ("Man Mo Temple") and
//! knowledge-base descriptions ("Buddhist temple in Kyoto").
//!
//! # Examples
//! ```
//! use waypost_core::Category;
//!
//! assert_eq!(Category::detect("Man Mo Temple"), Some(Category::Temple));
//! assert_eq!(Category::detect("Yosemite National Park"), Some(Category::NationalPark));
//! assert_eq!(Category::Museum.to_string(), "museum");
//! ```

use crate::text::{contains_cjk, fold};

/// The kind of place a POI represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Category {
    /// Buddhist, Taoist or Hindu temples and pagodas.
    Temple,
    /// Churches, cathedrals and chapels.
    Church,
    /// Mosques.
    Mosque,
    /// Synagogues and Jewish congregations.
    Synagogue,
    /// Shinto shrines and similar sanctuaries.
    Shrine,
    /// Monasteries, abbeys and convents.
    Monastery,
    /// Museums.
    Museum,
    /// Art galleries.
    Gallery,
    /// Historic sites and ruins.
    Historic,
    /// Monuments, memorials and statues.
    Monument,
    /// Castles, forts and palaces.
    Castle,
    /// Urban parks.
    Park,
    /// National parks and large protected areas.
    NationalPark,
    /// Gardens.
    Garden,
    /// Beaches.
    Beach,
    /// Mountains, peaks and hills.
    Mountain,
    /// Lakes.
    Lake,
    /// Viewpoints and observation decks.
    Viewpoint,
    /// General landmarks, squares and attractions.
    Landmark,
    /// Bridges.
    Bridge,
    /// Towers.
    Tower,
    /// Markets and bazaars.
    Market,
    /// Places irrelevant to sightseeing such as banks, shops and hotels.
    Commercial,
    /// Anything else.
    #[default]
    Other,
}

/// Broad grouping used to decide whether two categories are related.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryFamily {
    /// Places of worship.
    Religious,
    /// Museums and galleries.
    Cultural,
    /// Historic sites, monuments and castles.
    Historical,
    /// Parks and natural features.
    Nature,
    /// Built structures and viewpoints.
    Structure,
    /// Markets and commercial premises.
    Commerce,
    /// Unclassified places.
    Other,
}

/// Multi-word terms checked before single tokens.
const PHRASE_TERMS: &[(&str, Category)] = &[
    ("national park", Category::NationalPark),
    ("parc national", Category::NationalPark),
    ("parque nacional", Category::NationalPark),
    ("parco nazionale", Category::NationalPark),
    ("nationalpark", Category::NationalPark),
    ("historic site", Category::Historic),
    ("world heritage", Category::Historic),
    ("art gallery", Category::Gallery),
    ("observation deck", Category::Viewpoint),
];

/// Single-token terms, matched against folded words.
const TOKEN_TERMS: &[(&str, Category)] = &[
    ("temple", Category::Temple),
    ("temples", Category::Temple),
    ("templo", Category::Temple),
    ("tempio", Category::Temple),
    ("tempel", Category::Temple),
    ("buddhist", Category::Temple),
    ("taoist", Category::Temple),
    ("hindu", Category::Temple),
    ("pagoda", Category::Temple),
    ("wat", Category::Temple),
    ("shrine", Category::Shrine),
    ("jinja", Category::Shrine),
    ("sanctuaire", Category::Shrine),
    ("church", Category::Church),
    ("cathedral", Category::Church),
    ("chapel", Category::Church),
    ("basilica", Category::Church),
    ("eglise", Category::Church),
    ("iglesia", Category::Church),
    ("chiesa", Category::Church),
    ("kirche", Category::Church),
    ("cathedrale", Category::Church),
    ("catedral", Category::Church),
    ("mosque", Category::Mosque),
    ("masjid", Category::Mosque),
    ("mosquee", Category::Mosque),
    ("mezquita", Category::Mosque),
    ("moschee", Category::Mosque),
    ("synagogue", Category::Synagogue),
    ("congregation", Category::Synagogue),
    ("shul", Category::Synagogue),
    ("synagoge", Category::Synagogue),
    ("sinagoga", Category::Synagogue),
    ("monastery", Category::Monastery),
    ("abbey", Category::Monastery),
    ("convent", Category::Monastery),
    ("priory", Category::Monastery),
    ("kloster", Category::Monastery),
    ("monasterio", Category::Monastery),
    ("museum", Category::Museum),
    ("musee", Category::Museum),
    ("museo", Category::Museum),
    ("gallery", Category::Gallery),
    ("galerie", Category::Gallery),
    ("galleria", Category::Gallery),
    ("historic", Category::Historic),
    ("historical", Category::Historic),
    ("heritage", Category::Historic),
    ("ruins", Category::Historic),
    ("ruin", Category::Historic),
    ("archaeological", Category::Historic),
    ("monument", Category::Monument),
    ("memorial", Category::Monument),
    ("statue", Category::Monument),
    ("denkmal", Category::Monument),
    ("monumento", Category::Monument),
    ("castle", Category::Castle),
    ("fort", Category::Castle),
    ("fortress", Category::Castle),
    ("palace", Category::Castle),
    ("chateau", Category::Castle),
    ("castillo", Category::Castle),
    ("castello", Category::Castle),
    ("schloss", Category::Castle),
    ("burg", Category::Castle),
    ("park", Category::Park),
    ("parc", Category::Park),
    ("parque", Category::Park),
    ("parco", Category::Park),
    ("garden", Category::Garden),
    ("gardens", Category::Garden),
    ("jardin", Category::Garden),
    ("giardino", Category::Garden),
    ("garten", Category::Garden),
    ("beach", Category::Beach),
    ("plage", Category::Beach),
    ("playa", Category::Beach),
    ("spiaggia", Category::Beach),
    ("mountain", Category::Mountain),
    ("mount", Category::Mountain),
    ("mt", Category::Mountain),
    ("peak", Category::Mountain),
    ("hill", Category::Mountain),
    ("volcano", Category::Mountain),
    ("lake", Category::Lake),
    ("lac", Category::Lake),
    ("lago", Category::Lake),
    ("viewpoint", Category::Viewpoint),
    ("lookout", Category::Viewpoint),
    ("overlook", Category::Viewpoint),
    ("belvedere", Category::Viewpoint),
    ("mirador", Category::Viewpoint),
    ("landmark", Category::Landmark),
    ("attraction", Category::Landmark),
    ("square", Category::Landmark),
    ("plaza", Category::Landmark),
    ("bridge", Category::Bridge),
    ("pont", Category::Bridge),
    ("puente", Category::Bridge),
    ("ponte", Category::Bridge),
    ("brucke", Category::Bridge),
    ("tower", Category::Tower),
    ("torre", Category::Tower),
    ("turm", Category::Tower),
    ("market", Category::Market),
    ("marche", Category::Market),
    ("mercado", Category::Market),
    ("mercato", Category::Market),
    ("markt", Category::Market),
    ("bazaar", Category::Market),
    ("bank", Category::Commercial),
    ("banque", Category::Commercial),
    ("banco", Category::Commercial),
    ("banca", Category::Commercial),
    ("hotel", Category::Commercial),
    ("restaurant", Category::Commercial),
    ("cafe", Category::Commercial),
    ("shop", Category::Commercial),
    ("store", Category::Commercial),
    ("mall", Category::Commercial),
    ("supermarket", Category::Commercial),
    ("pharmacy", Category::Commercial),
    ("pharmacie", Category::Commercial),
    ("hospital", Category::Commercial),
    ("hopital", Category::Commercial),
    ("school", Category::Commercial),
    ("ecole", Category::Commercial),
    ("office", Category::Commercial),
];

/// CJK terms matched as substrings; longer terms are listed first.
const CJK_TERMS: &[(&str, Category)] = &[
    ("国家公园", Category::NationalPark),
    ("国立公園", Category::NationalPark),
    ("清真寺", Category::Mosque),
    ("犹太会堂", Category::Synagogue),
    ("修道院", Category::Monastery),
    ("博物館", Category::Museum),
    ("博物馆", Category::Museum),
    ("美術館", Category::Gallery),
    ("美术馆", Category::Gallery),
    ("展望台", Category::Viewpoint),
    ("观景台", Category::Viewpoint),
    ("纪念碑", Category::Monument),
    ("記念碑", Category::Monument),
    ("教会", Category::Church),
    ("教堂", Category::Church),
    ("神社", Category::Shrine),
    ("寺院", Category::Temple),
    ("公园", Category::Park),
    ("公園", Category::Park),
    ("庭園", Category::Garden),
    ("花园", Category::Garden),
    ("遗址", Category::Historic),
    ("遺跡", Category::Historic),
    ("古迹", Category::Historic),
    ("城堡", Category::Castle),
    ("广场", Category::Landmark),
    ("広場", Category::Landmark),
    ("市场", Category::Market),
    ("市場", Category::Market),
    ("银行", Category::Commercial),
    ("銀行", Category::Commercial),
    ("酒店", Category::Commercial),
    ("박물관", Category::Museum),
    ("공원", Category::Park),
    ("사찰", Category::Temple),
    ("寺", Category::Temple),
    ("廟", Category::Temple),
    ("庙", Category::Temple),
    ("宮", Category::Shrine),
    ("塔", Category::Tower),
    ("桥", Category::Bridge),
    ("橋", Category::Bridge),
    ("湖", Category::Lake),
    ("山", Category::Mountain),
];

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Self; 24] = [
        Self::Temple,
        Self::Church,
        Self::Mosque,
        Self::Synagogue,
        Self::Shrine,
        Self::Monastery,
        Self::Museum,
        Self::Gallery,
        Self::Historic,
        Self::Monument,
        Self::Castle,
        Self::Park,
        Self::NationalPark,
        Self::Garden,
        Self::Beach,
        Self::Mountain,
        Self::Lake,
        Self::Viewpoint,
        Self::Landmark,
        Self::Bridge,
        Self::Tower,
        Self::Market,
        Self::Commercial,
        Self::Other,
    ];

    /// Return the category as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use waypost_core::Category;
    ///
    /// assert_eq!(Category::NationalPark.as_str(), "national_park");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Temple => "temple",
            Self::Church => "church",
            Self::Mosque => "mosque",
            Self::Synagogue => "synagogue",
            Self::Shrine => "shrine",
            Self::Monastery => "monastery",
            Self::Museum => "museum",
            Self::Gallery => "gallery",
            Self::Historic => "historic",
            Self::Monument => "monument",
            Self::Castle => "castle",
            Self::Park => "park",
            Self::NationalPark => "national_park",
            Self::Garden => "garden",
            Self::Beach => "beach",
            Self::Mountain => "mountain",
            Self::Lake => "lake",
            Self::Viewpoint => "viewpoint",
            Self::Landmark => "landmark",
            Self::Bridge => "bridge",
            Self::Tower => "tower",
            Self::Market => "market",
            Self::Commercial => "commercial",
            Self::Other => "other",
        }
    }

    /// Family the category belongs to.
    #[must_use]
    pub const fn family(self) -> CategoryFamily {
        match self {
            Self::Temple
            | Self::Church
            | Self::Mosque
            | Self::Synagogue
            | Self::Shrine
            | Self::Monastery => CategoryFamily::Religious,
            Self::Museum | Self::Gallery => CategoryFamily::Cultural,
            Self::Historic | Self::Monument | Self::Castle => CategoryFamily::Historical,
            Self::Park
            | Self::NationalPark
            | Self::Garden
            | Self::Beach
            | Self::Mountain
            | Self::Lake => CategoryFamily::Nature,
            Self::Viewpoint | Self::Landmark | Self::Bridge | Self::Tower => {
                CategoryFamily::Structure
            }
            Self::Market | Self::Commercial => CategoryFamily::Commerce,
            Self::Other => CategoryFamily::Other,
        }
    }

    /// Detect the category named by a type term in `text`.
    ///
    /// Multi-word phrases win over single words; otherwise the first type
    /// term in reading order decides. Returns `None` when `text` contains no
    /// known type term.
    #[must_use]
    pub fn detect(text: &str) -> Option<Self> {
        let folded = fold(text);
        if folded.is_empty() {
            return None;
        }
        if contains_cjk(&folded)
            && let Some(category) = detect_cjk(&folded)
        {
            return Some(category);
        }
        detect_latin(&folded)
    }
}

fn detect_cjk(folded: &str) -> Option<Category> {
    CJK_TERMS
        .iter()
        .find(|(term, _)| folded.contains(term))
        .map(|&(_, category)| category)
}

fn detect_latin(folded: &str) -> Option<Category> {
    let padded = format!(" {folded} ");
    let phrase = PHRASE_TERMS
        .iter()
        .find(|(term, _)| padded.contains(&format!(" {term} ")))
        .map(|&(_, category)| category);
    if phrase.is_some() {
        return phrase;
    }
    folded.split(' ').find_map(|word| {
        TOKEN_TERMS
            .iter()
            .find(|(term, _)| *term == word)
            .map(|&(_, category)| category)
    })
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("Buddhist temple in Kyoto", Some(Category::Temple))]
    #[case("Congregation Sherith Israel", Some(Category::Synagogue))]
    #[case("banque", Some(Category::Commercial))]
    #[case("Parc national des Écrins", Some(Category::NationalPark))]
    #[case("Église Saint-Sulpice", Some(Category::Church))]
    #[case("文武廟", Some(Category::Temple))]
    #[case("東京国立博物館", Some(Category::Museum))]
    #[case("清真寺", Some(Category::Mosque))]
    #[case("Shearith Israel", None)]
    #[case("", None)]
    fn detects_categories(#[case] text: &str, #[case] expected: Option<Category>) {
        assert_eq!(Category::detect(text), expected);
    }

    #[rstest]
    fn round_trips_through_strings() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.as_str()), Ok(category));
        }
    }

    #[rstest]
    fn parses_spaced_names() {
        assert_eq!(
            Category::from_str("National Park"),
            Ok(Category::NationalPark)
        );
        assert!(Category::from_str("spaceport").is_err());
    }

    #[rstest]
    fn religious_categories_share_a_family() {
        assert_eq!(Category::Temple.family(), Category::Synagogue.family());
        assert_ne!(Category::Temple.family(), Category::Commercial.family());
    }
}
