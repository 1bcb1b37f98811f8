//! Catalogue of Italian public-administration data sources.
//!
//! The catalogue is compiled into the program and never mutated. Lookups of
//! unknown ids return `None`; display code falls back to the raw id.

use serde::Serialize;
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Id of the only source backed by a live endpoint.
pub const DATIGOV: &str = "datigov";

/// One catalogued public-data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    /// Stable identifier, referenced by [`crate::SearchResult::source`].
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Portal or endpoint URL.
    pub url: &'static str,
    /// Badge colour (CSS hex).
    pub color: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Typical documents published by the source.
    pub details: &'static str,
}

const SOURCES: &[Source] = &[
    Source {
        id: "datigov",
        name: "Dati.gov.it",
        url: "https://www.dati.gov.it/api/3/action/package_search",
        color: "#0066CC",
        description: "Catalogo nazionale dei dati aperti della PA",
        details: "Documenti tipici: dataset CSV, JSON, XML su vari temi (demografia, economia, ambiente, ecc.)",
    },
    Source {
        id: "geoportale",
        name: "Geoportale Nazionale (RNDT)",
        url: "https://geodati.gov.it",
        color: "#2E7D32",
        description: "Repertorio Nazionale dei Dati Territoriali",
        details: "Documenti tipici: cartografie, ortofoto, dati GIS, mappe.",
    },
    Source {
        id: "ipa",
        name: "Indice PA (IPA)",
        url: "https://indicepa.gov.it",
        color: "#1976D2",
        description: "Indice delle Pubbliche Amministrazioni",
        details: "Documenti tipici: anagrafica enti pubblici, contatti, organizzazione.",
    },
    Source {
        id: "salute",
        name: "Dati.salute.gov.it",
        url: "https://www.dati.salute.gov.it",
        color: "#C62828",
        description: "Open Data del Ministero della Salute",
        details: "Documenti tipici: dati sanitari, strutture ospedaliere, farmaci, prevenzione.",
    },
    Source {
        id: "scuola",
        name: "Portale Unico Dati Scuola",
        url: "https://dati.istruzione.it",
        color: "#F57C00",
        description: "Dati aperti del sistema scolastico italiano",
        details: "Documenti tipici: anagrafica scuole, iscrizioni, personale docente, risultati.",
    },
    Source {
        id: "openbdap",
        name: "OpenBDAP",
        url: "https://openbdap.rgs.mef.gov.it",
        color: "#5E35B1",
        description: "Banca Dati delle Amministrazioni Pubbliche",
        details: "Documenti tipici: dati finanziari, bilanci, personale PA.",
    },
    Source {
        id: "anac",
        name: "ANAC / BDNCP",
        url: "https://dati.anticorruzione.it",
        color: "#00695C",
        description: "Banca Dati Nazionale dei Contratti Pubblici",
        details: "Documenti tipici: appalti, contratti, gare, anticorruzione.",
    },
    Source {
        id: "opencantieri",
        name: "Open Cantieri",
        url: "https://opencantieri.mit.gov.it",
        color: "#F9A825",
        description: "Monitoraggio opere pubbliche",
        details: "Documenti tipici: infrastrutture, cantieri, stato avanzamento lavori.",
    },
    Source {
        id: "opencoesione",
        name: "Open Coesione",
        url: "https://opencoesione.gov.it",
        color: "#6A1B9A",
        description: "Politiche di coesione in Italia",
        details: "Documenti tipici: progetti finanziati, fondi europei, sviluppo territoriale.",
    },
    Source {
        id: "soldipubblici",
        name: "SoldiPubblici",
        url: "https://soldipubblici.gov.it",
        color: "#D32F2F",
        description: "Portale della trasparenza dei conti pubblici",
        details: "Documenti tipici: spesa pubblica, bilanci, trasparenza.",
    },
    Source {
        id: "registroimprese",
        name: "Registro Imprese (InfoCamere)",
        url: "https://www.registroimprese.it",
        color: "#0277BD",
        description: "Dati aperti del Registro delle Imprese",
        details: "Documenti tipici: imprese italiane, bilanci, partecipazioni.",
    },
    Source {
        id: "inps",
        name: "INPS Open Data",
        url: "https://www.inps.it/opendata",
        color: "#1565C0",
        description: "Open Data INPS su previdenza e assistenza",
        details: "Documenti tipici: dati pensioni, ammortizzatori sociali, prestazioni.",
    },
    Source {
        id: "inail",
        name: "INAIL Open Data",
        url: "https://www.inail.it/opendata",
        color: "#283593",
        description: "Dati aperti su sicurezza e salute sul lavoro",
        details: "Documenti tipici: infortuni, malattie professionali, prevenzione.",
    },
    Source {
        id: "ispra",
        name: "ISPRA Ambiente",
        url: "https://www.isprambiente.gov.it/it/banche-dati",
        color: "#388E3C",
        description: "Annuario dati ambientali ISPRA",
        details: "Documenti tipici: qualità aria, acqua, biodiversità, clima, inquinamento.",
    },
    Source {
        id: "agenziaentrate",
        name: "Agenzia delle Entrate",
        url: "https://www.agenziaentrate.gov.it/portale/web/guest/schede/fabbricatiterreni/omi/banche-dati",
        color: "#6D4C41",
        description: "Statistiche fiscali e dati catastali",
        details: "Documenti tipici: OMI, catasto, dichiarazioni fiscali.",
    },
    Source {
        id: "dogane",
        name: "Agenzia Dogane e Monopoli",
        url: "https://www.adm.gov.it/portale/statistiche",
        color: "#455A64",
        description: "Open Data su commercio estero e accise",
        details: "Documenti tipici: import/export, statistiche doganali.",
    },
    Source {
        id: "istat",
        name: "Istat (I.Stat / LOD)",
        url: "http://dati.istat.it",
        color: "#303F9F",
        description: "Statistiche ufficiali e linked open data",
        details: "Documenti tipici: dati demografici, economici, sociali, territoriali.",
    },
    Source {
        id: "normattiva",
        name: "Normattiva",
        url: "https://www.normattiva.it/uri-res/N2Ls",
        color: "#004C99",
        description: "Banca dati della normativa italiana",
        details: "Documenti tipici: leggi, decreti legislativi, decreti ministeriali, circolari.",
    },
    Source {
        id: "gazzetta",
        name: "Gazzetta Ufficiale",
        url: "https://www.gazzettaufficiale.it",
        color: "#FF9900",
        description: "Pubblicazioni ufficiali della Repubblica",
        details: "Documenti tipici: Gazzetta Ufficiale, bandi di concorso, decreti, avvisi.",
    },
    Source {
        id: "innovazione",
        name: "Innovazione.gov.it",
        url: "https://innovazione.gov.it",
        color: "#28a745",
        description: "Innovazione e trasformazione digitale",
        details: "Documenti tipici: PNRR, strategie digitali, innovazione PA.",
    },
];

/// Read-only view over the source catalogue.
#[derive(Debug, Clone, Copy)]
pub struct SourceRegistry {
    sources: &'static [Source],
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::bundled()
    }
}

impl SourceRegistry {
    /// The catalogue compiled into the program.
    pub fn bundled() -> Self {
        Self { sources: SOURCES }
    }

    /// All sources sorted by display name (case- and accent-insensitive).
    pub fn list_sources(&self) -> Vec<&'static Source> {
        let mut sorted: Vec<&'static Source> = self.sources.iter().collect();
        sorted.sort_by(|a, b| collate(a.name, b.name));
        sorted
    }

    /// Look up a source by id.
    pub fn get_source(&self, id: &str) -> Option<&'static Source> {
        self.sources.iter().find(|s| s.id == id)
    }

    /// Display name for `id`, or the raw id when the source is unknown.
    pub fn display_name(&self, id: &str) -> String {
        self.get_source(id)
            .map_or_else(|| id.to_owned(), |s| s.name.to_owned())
    }

    /// Number of catalogued sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns `true` if the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Primary-strength comparison for Italian names, then raw order as tie-break.
fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Canonical decomposition with combining marks dropped, then lowercased.
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
