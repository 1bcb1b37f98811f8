//! Guided source recommendation.
//!
//! Two answers, the kind of information needed and the sector, map to the
//! id of the source most likely to hold it.

/// Answers to "Che tipo di informazioni stai cercando?".
pub const NEEDS: &[(&str, &str)] = &[
    ("normativa", "Leggi e Normative"),
    ("dati", "Dati e Statistiche"),
    ("documenti", "Documenti Amministrativi"),
    ("servizi", "Servizi e Informazioni PA"),
];

/// Answers to "Quale settore ti interessa?".
pub const SECTORS: &[(&str, &str)] = &[
    ("salute", "Salute"),
    ("economia", "Economia e Finanze"),
    ("ambiente", "Ambiente"),
    ("lavoro", "Lavoro e Previdenza"),
    ("istruzione", "Istruzione"),
    ("territorio", "Territorio e Infrastrutture"),
    ("altro", "Altro"),
];

const SECTOR_SOURCES: &[(&str, &str)] = &[
    ("salute", "salute"),
    ("economia", "datigov"),
    ("ambiente", "ispra"),
    ("lavoro", "inps"),
    ("istruzione", "scuola"),
    ("territorio", "geoportale"),
];

const DEFAULT_SOURCE: &str = "datigov";

/// Source id to search for `need` in `sector`.
///
/// The sector only matters for data requests; unknown answers fall through
/// to dati.gov.it.
pub fn recommend_source(need: &str, sector: &str) -> &'static str {
    match need.trim() {
        "normativa" => "normattiva",
        "documenti" => "gazzetta",
        "servizi" => "ipa",
        _ => {
            let sector = sector.trim();
            SECTOR_SOURCES
                .iter()
                .find(|&&(s, _)| s == sector)
                .map_or(DEFAULT_SOURCE, |&(_, source)| source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use propa_search::SourceRegistry;

    #[test]
    fn need_decides_before_sector() {
        assert_eq!(recommend_source("normativa", "salute"), "normattiva");
        assert_eq!(recommend_source("documenti", "ambiente"), "gazzetta");
        assert_eq!(recommend_source("servizi", "lavoro"), "ipa");
    }

    #[test]
    fn data_requests_route_by_sector() {
        assert_eq!(recommend_source("dati", "salute"), "salute");
        assert_eq!(recommend_source("dati", "economia"), "datigov");
        assert_eq!(recommend_source("dati", "ambiente"), "ispra");
        assert_eq!(recommend_source("dati", "lavoro"), "inps");
        assert_eq!(recommend_source("dati", "istruzione"), "scuola");
        assert_eq!(recommend_source("dati", "territorio"), "geoportale");
        assert_eq!(recommend_source("dati", "altro"), "datigov");
        assert_eq!(recommend_source("dati", "turismo"), "datigov");
    }

    #[test]
    fn every_recommendation_is_a_known_source() {
        let registry = SourceRegistry::bundled();
        for (need, _) in NEEDS {
            for (sector, _) in SECTORS {
                let id = recommend_source(need, sector);
                assert!(registry.get_source(id).is_some(), "unknown source {id}");
            }
        }
    }
}
