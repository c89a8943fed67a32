//! Geographic zone classification and provider relevance scoring.
//!
//! Free-text addresses (as typed by customers or returned by the places
//! autocomplete) are mapped to one of the seven zones the platform
//! operates in. Matching is normalized substring containment against
//! fixed lookup tables: exact localities first, then broader zone
//! keywords, then an airport heuristic for addresses that only name the
//! airport. The tables are deployment reference data; resolution order
//! is the documented tie-break for overlaps.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fixed set of service zones for the deployed country.
///
/// Serialized with the labels providers declare in `service_zones` and
/// the admin UI displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeographicZone {
    #[serde(rename = "Tunis et Nord")]
    TunisNord,
    #[serde(rename = "Sousse et Sahel")]
    SousseSahel,
    #[serde(rename = "Monastir et Mahdia")]
    MonastirMahdia,
    Sfax,
    Kairouan,
    #[serde(rename = "Djerba et Sud")]
    DjerbaSud,
    #[serde(rename = "Tozeur et Désert")]
    TozeurDesert,
}

impl GeographicZone {
    /// The label used in provider `service_zones` lists.
    pub fn label(&self) -> &'static str {
        match self {
            GeographicZone::TunisNord => "Tunis et Nord",
            GeographicZone::SousseSahel => "Sousse et Sahel",
            GeographicZone::MonastirMahdia => "Monastir et Mahdia",
            GeographicZone::Sfax => "Sfax",
            GeographicZone::Kairouan => "Kairouan",
            GeographicZone::DjerbaSud => "Djerba et Sud",
            GeographicZone::TozeurDesert => "Tozeur et Désert",
        }
    }
}

impl std::fmt::Display for GeographicZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Locality → zone table, checked first. Entry order matters: the first
/// containment match wins. Multi-word localities are matched as whole
/// substrings.
static CITY_ZONES: &[(&str, GeographicZone)] = &[
    // Tunis et Nord
    ("tunis", GeographicZone::TunisNord),
    ("carthage", GeographicZone::TunisNord),
    ("la marsa", GeographicZone::TunisNord),
    ("sidi bou said", GeographicZone::TunisNord),
    ("ariana", GeographicZone::TunisNord),
    ("ben arous", GeographicZone::TunisNord),
    ("manouba", GeographicZone::TunisNord),
    ("bizerte", GeographicZone::TunisNord),
    ("nabeul", GeographicZone::TunisNord),
    ("hammamet", GeographicZone::TunisNord),
    ("tunis-carthage", GeographicZone::TunisNord),
    // Aéroport Enfidha sits in the Sousse zone
    ("enfidha", GeographicZone::SousseSahel),
    // Sousse et Sahel
    ("sousse", GeographicZone::SousseSahel),
    ("monastir", GeographicZone::MonastirMahdia),
    ("mahdia", GeographicZone::MonastirMahdia),
    ("port el kantaoui", GeographicZone::SousseSahel),
    // Sfax
    ("sfax", GeographicZone::Sfax),
    // Kairouan
    ("kairouan", GeographicZone::Kairouan),
    // Djerba et Sud
    ("djerba", GeographicZone::DjerbaSud),
    ("zarzis", GeographicZone::DjerbaSud),
    ("houmt souk", GeographicZone::DjerbaSud),
    ("midoun", GeographicZone::DjerbaSud),
    ("medenine", GeographicZone::DjerbaSud),
    ("gabès", GeographicZone::DjerbaSud),
    ("gabes", GeographicZone::DjerbaSud),
    ("tataouine", GeographicZone::DjerbaSud),
    // Tozeur et Désert
    ("tozeur", GeographicZone::TozeurDesert),
    ("nefta", GeographicZone::TozeurDesert),
    ("douz", GeographicZone::TozeurDesert),
    ("kebili", GeographicZone::TozeurDesert),
    ("gafsa", GeographicZone::TozeurDesert),
];

/// Broader keyword → zone table, checked when no locality matched.
/// Covers regional descriptors absent from the locality table.
static ZONE_KEYWORDS: &[(GeographicZone, &[&str])] = &[
    (
        GeographicZone::TunisNord,
        &["tunis", "carthage", "ariana", "bizerte", "nabeul", "hammamet", "la marsa"],
    ),
    (
        GeographicZone::SousseSahel,
        &["sousse", "port el kantaoui", "enfidha"],
    ),
    (GeographicZone::MonastirMahdia, &["monastir", "mahdia"]),
    (GeographicZone::Sfax, &["sfax"]),
    (GeographicZone::Kairouan, &["kairouan"]),
    (
        GeographicZone::DjerbaSud,
        &["djerba", "zarzis", "houmt", "midoun", "medenine", "gabès", "gabes", "tataouine"],
    ),
    (
        GeographicZone::TozeurDesert,
        &["tozeur", "nefta", "douz", "kebili", "gafsa", "désert", "desert"],
    ),
];

/// Hub cities for the airport heuristic. Airport names often omit the
/// locality substring the main tables key on.
static AIRPORT_HUBS: &[(&str, GeographicZone)] = &[
    ("tunis", GeographicZone::TunisNord),
    ("enfidha", GeographicZone::SousseSahel),
    ("djerba", GeographicZone::DjerbaSud),
    ("tozeur", GeographicZone::TozeurDesert),
    ("sfax", GeographicZone::Sfax),
    ("monastir", GeographicZone::MonastirMahdia),
];

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'î' | 'ï' => 'i',
        'ô' | 'ö' => 'o',
        'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        _ => c,
    }
}

/// Lowercase, fold the accented characters seen in addresses here, trim.
pub fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .map(fold_accent)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Classify a free-text address into a service zone.
///
/// Returns `None` when the zone cannot be identified — an unknown zone,
/// not an error.
pub fn classify_zone(address: &str) -> Option<GeographicZone> {
    if address.trim().is_empty() {
        return None;
    }

    let normalized = normalize(address);

    for (city, zone) in CITY_ZONES {
        if normalized.contains(&normalize(city)) {
            return Some(*zone);
        }
    }

    for (zone, keywords) in ZONE_KEYWORDS {
        for keyword in *keywords {
            if normalized.contains(&normalize(keyword)) {
                return Some(*zone);
            }
        }
    }

    if normalized.contains("aeroport") || normalized.contains("airport") {
        for (hub, zone) in AIRPORT_HUBS {
            if normalized.contains(hub) {
                return Some(*zone);
            }
        }
    }

    None
}

/// Check whether a provider serves a zone.
///
/// A provider with no declared zones serves everywhere; an unknown
/// target zone never disqualifies.
pub fn provider_serves_zone(
    service_zones: Option<&[String]>,
    target: Option<GeographicZone>,
) -> bool {
    let zones = match service_zones {
        Some(zones) if !zones.is_empty() => zones,
        _ => return true,
    };

    match target {
        Some(zone) => zones.iter().any(|z| z == zone.label()),
        None => true,
    }
}

/// Relevance score of a provider for a trip, 0 to 2.
///
/// Unrestricted providers score 1: below a confirmed double match but
/// never excluded. Zone-restricted providers earn +1 per known endpoint
/// they cover; an unknown endpoint waives that condition.
pub fn relevance_score(
    service_zones: Option<&[String]>,
    origin: Option<GeographicZone>,
    destination: Option<GeographicZone>,
) -> u8 {
    let zones = match service_zones {
        Some(zones) if !zones.is_empty() => zones,
        _ => return 1,
    };

    let mut score = 0;

    if let Some(zone) = origin {
        if zones.iter().any(|z| z == zone.label()) {
            score += 1;
        }
    }

    if let Some(zone) = destination {
        if zones.iter().any(|z| z == zone.label()) {
            score += 1;
        }
    }

    score
}

/// Filter priced vehicles by zone relevance and rank the survivors.
///
/// Vehicles whose provider covers neither endpoint (score 0) are
/// dropped. The rest sort by score descending, then price ascending;
/// the sort is stable, so equal entries keep their input order. A
/// vehicle whose provider is absent from the map is treated as
/// unrestricted.
pub fn filter_and_rank_by_zones<T>(
    vehicles: Vec<T>,
    provider_zones: &HashMap<Uuid, Option<Vec<String>>>,
    provider_of: impl Fn(&T) -> Option<Uuid>,
    price_of: impl Fn(&T) -> Decimal,
    origin: Option<GeographicZone>,
    destination: Option<GeographicZone>,
) -> Vec<T> {
    let mut scored: Vec<(u8, T)> = vehicles
        .into_iter()
        .map(|vehicle| {
            let zones = provider_of(&vehicle)
                .and_then(|id| provider_zones.get(&id))
                .and_then(|z| z.as_deref());
            (relevance_score(zones, origin, destination), vehicle)
        })
        .collect();

    scored.retain(|(score, _)| *score > 0);
    scored.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| price_of(&a.1).cmp(&price_of(&b.1)))
    });

    scored.into_iter().map(|(_, vehicle)| vehicle).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // ==================== normalize tests ====================

    #[test]
    fn test_normalize_strips_accents_and_case() {
        assert_eq!(normalize("Aéroport"), "aeroport");
        assert_eq!(normalize("  GABÈS  "), "gabes");
        assert_eq!(normalize("Désert"), "desert");
        assert_eq!(normalize("Tozeur"), "tozeur");
    }

    // ==================== classify_zone tests ====================

    #[test]
    fn test_classify_by_exact_city() {
        assert_eq!(
            classify_zone("Aéroport Djerba Zarzis, Djerba, Tunisia"),
            Some(GeographicZone::DjerbaSud)
        );
        assert_eq!(classify_zone("Hammamet centre"), Some(GeographicZone::TunisNord));
        assert_eq!(classify_zone("Sfax ville"), Some(GeographicZone::Sfax));
        assert_eq!(classify_zone("Kairouan"), Some(GeographicZone::Kairouan));
    }

    #[test]
    fn test_classify_multi_word_locality() {
        assert_eq!(
            classify_zone("Hotel Marina, Port El Kantaoui"),
            Some(GeographicZone::SousseSahel)
        );
        assert_eq!(
            classify_zone("Sidi Bou Said, Tunisie"),
            Some(GeographicZone::TunisNord)
        );
    }

    #[test]
    fn test_classify_airport_address() {
        // "tunis" matches before the airport heuristic is consulted
        assert_eq!(
            classify_zone("Route de l'Aéroport, Tunis-Carthage"),
            Some(GeographicZone::TunisNord)
        );
        assert_eq!(
            classify_zone("Aéroport d'Enfidha"),
            Some(GeographicZone::SousseSahel)
        );
    }

    #[test]
    fn test_classify_by_keyword() {
        // "houmt" is only in the keyword table ("houmt souk" is the locality)
        assert_eq!(classify_zone("Quartier Houmt"), Some(GeographicZone::DjerbaSud));
        assert_eq!(
            classify_zone("Excursion dans le désert"),
            Some(GeographicZone::TozeurDesert)
        );
    }

    #[test]
    fn test_classify_accent_variants() {
        assert_eq!(classify_zone("Gabès centre ville"), Some(GeographicZone::DjerbaSud));
        assert_eq!(classify_zone("gabes"), Some(GeographicZone::DjerbaSud));
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify_zone("Unknown Village"), None);
        assert_eq!(classify_zone(""), None);
        assert_eq!(classify_zone("   "), None);
    }

    #[test]
    fn test_enfidha_maps_to_sousse() {
        // Enfidha airport belongs to the Sousse zone despite its
        // northern location
        assert_eq!(classify_zone("Enfidha"), Some(GeographicZone::SousseSahel));
    }

    // ==================== provider_serves_zone tests ====================

    fn zones(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unrestricted_provider_serves_everywhere() {
        assert!(provider_serves_zone(None, Some(GeographicZone::Sfax)));
        assert!(provider_serves_zone(Some(&[]), Some(GeographicZone::Sfax)));
    }

    #[test]
    fn test_unknown_target_never_disqualifies() {
        let z = zones(&["Sfax"]);
        assert!(provider_serves_zone(Some(&z), None));
    }

    #[test]
    fn test_restricted_provider_zone_membership() {
        let z = zones(&["Djerba et Sud", "Sfax"]);
        assert!(provider_serves_zone(Some(&z), Some(GeographicZone::Sfax)));
        assert!(!provider_serves_zone(Some(&z), Some(GeographicZone::TunisNord)));
    }

    // ==================== relevance_score tests ====================

    #[test]
    fn test_score_unrestricted_is_one() {
        assert_eq!(
            relevance_score(None, Some(GeographicZone::DjerbaSud), Some(GeographicZone::DjerbaSud)),
            1
        );
        let empty = zones(&[]);
        assert_eq!(
            relevance_score(Some(&empty), Some(GeographicZone::DjerbaSud), None),
            1
        );
    }

    #[test]
    fn test_score_counts_covered_endpoints() {
        let z = zones(&["Djerba et Sud"]);
        assert_eq!(
            relevance_score(Some(&z), Some(GeographicZone::DjerbaSud), Some(GeographicZone::DjerbaSud)),
            2
        );
        assert_eq!(
            relevance_score(Some(&z), Some(GeographicZone::DjerbaSud), Some(GeographicZone::TunisNord)),
            1
        );
        assert_eq!(
            relevance_score(Some(&z), Some(GeographicZone::TunisNord), Some(GeographicZone::TunisNord)),
            0
        );
    }

    #[test]
    fn test_score_unknown_endpoint_waives_condition() {
        let z = zones(&["Djerba et Sud"]);
        assert_eq!(relevance_score(Some(&z), None, Some(GeographicZone::DjerbaSud)), 1);
        assert_eq!(relevance_score(Some(&z), None, None), 0);
    }

    // ==================== filter_and_rank_by_zones tests ====================

    #[derive(Debug, Clone, PartialEq)]
    struct Candidate {
        tag: &'static str,
        provider_id: Option<Uuid>,
        price: Decimal,
    }

    fn rank(
        candidates: Vec<Candidate>,
        provider_zones: &HashMap<Uuid, Option<Vec<String>>>,
        origin: Option<GeographicZone>,
        destination: Option<GeographicZone>,
    ) -> Vec<&'static str> {
        filter_and_rank_by_zones(
            candidates,
            provider_zones,
            |c| c.provider_id,
            |c| c.price,
            origin,
            destination,
        )
        .into_iter()
        .map(|c| c.tag)
        .collect()
    }

    #[test]
    fn test_relevance_beats_price() {
        let unrestricted = Uuid::new_v4();
        let southern = Uuid::new_v4();
        let mut map = HashMap::new();
        map.insert(unrestricted, None);
        map.insert(southern, Some(zones(&["Djerba et Sud"])));

        let ranked = rank(
            vec![
                Candidate { tag: "A", provider_id: Some(unrestricted), price: dec!(100) },
                Candidate { tag: "B", provider_id: Some(southern), price: dec!(80) },
            ],
            &map,
            Some(GeographicZone::DjerbaSud),
            Some(GeographicZone::DjerbaSud),
        );

        // B double-matches (score 2) and outranks the cheaper-scored A
        // even though A would also be kept
        assert_eq!(ranked, vec!["B", "A"]);
    }

    #[test]
    fn test_zone_mismatch_is_excluded() {
        let northern = Uuid::new_v4();
        let mut map = HashMap::new();
        map.insert(northern, Some(zones(&["Tunis et Nord"])));

        let ranked = rank(
            vec![Candidate { tag: "A", provider_id: Some(northern), price: dec!(50) }],
            &map,
            Some(GeographicZone::DjerbaSud),
            Some(GeographicZone::DjerbaSud),
        );

        assert!(ranked.is_empty());
    }

    #[test]
    fn test_equal_score_sorts_by_price() {
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let mut map = HashMap::new();
        map.insert(p1, Some(zones(&["Sfax"])));
        map.insert(p2, Some(zones(&["Sfax"])));

        let ranked = rank(
            vec![
                Candidate { tag: "expensive", provider_id: Some(p1), price: dec!(120) },
                Candidate { tag: "cheap", provider_id: Some(p2), price: dec!(90) },
            ],
            &map,
            Some(GeographicZone::Sfax),
            Some(GeographicZone::Sfax),
        );

        assert_eq!(ranked, vec!["cheap", "expensive"]);
    }

    #[test]
    fn test_missing_provider_treated_as_unrestricted() {
        let map = HashMap::new();

        let ranked = rank(
            vec![Candidate { tag: "A", provider_id: None, price: dec!(60) }],
            &map,
            Some(GeographicZone::Sfax),
            Some(GeographicZone::Sfax),
        );

        assert_eq!(ranked, vec!["A"]);
    }

    #[test]
    fn test_stable_order_on_full_tie() {
        let p = Uuid::new_v4();
        let mut map = HashMap::new();
        map.insert(p, Some(zones(&["Sfax"])));

        let ranked = rank(
            vec![
                Candidate { tag: "first", provider_id: Some(p), price: dec!(90) },
                Candidate { tag: "second", provider_id: Some(p), price: dec!(90) },
            ],
            &map,
            Some(GeographicZone::Sfax),
            None,
        );

        assert_eq!(ranked, vec!["first", "second"]);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let map = HashMap::new();
        let ranked = rank(vec![], &map, None, None);
        assert!(ranked.is_empty());
    }
}
