//! Bundled result dataset.
//!
//! Used as the fallback whenever the live endpoint is disabled, fails, or
//! returns nothing.

use crate::types::{ResultId, SearchResult};

struct Row {
    id: i64,
    title: &'static str,
    description: &'static str,
    source: &'static str,
    category: &'static str,
    date: &'static str,
    url: &'static str,
    tags: &'static [&'static str],
}

const ROWS: &[Row] = &[
    Row {
        id: 1,
        title: "Dataset Open Data - Anagrafe Popolazione Residente",
        description: "Dati relativi alla popolazione residente nei comuni italiani, aggiornati trimestralmente. Include informazioni demografiche, fasce d'età, e distribuzione territoriale.",
        source: "datigov",
        category: "demografia",
        date: "2024-01-15",
        url: "https://www.dati.gov.it/dataset/popolazione-residente",
        tags: &["popolazione", "demografia", "anagrafe", "comuni"],
    },
    Row {
        id: 2,
        title: "Decreto Legislativo 33/2013 - Trasparenza PA",
        description: "Riordino della disciplina riguardante il diritto di accesso civico e gli obblighi di pubblicità, trasparenza e diffusione di informazioni da parte delle pubbliche amministrazioni.",
        source: "normattiva",
        category: "normativa",
        date: "2013-03-14",
        url: "https://www.normattiva.it/uri-res/N2Ls?urn:nir:stato:decreto.legislativo:2013-03-14;33",
        tags: &["trasparenza", "accesso civico", "pubblicità", "PA"],
    },
    Row {
        id: 3,
        title: "Dati sulla Qualità dell'Aria - ISPRA",
        description: "Monitoraggio della qualità dell'aria nelle principali città italiane. Dati su PM10, PM2.5, NO2, O3 e altri inquinanti atmosferici.",
        source: "datigov",
        category: "ambiente",
        date: "2024-02-01",
        url: "https://www.dati.gov.it/dataset/qualita-aria",
        tags: &["ambiente", "inquinamento", "aria", "ISPRA", "monitoraggio"],
    },
    Row {
        id: 4,
        title: "Piano Nazionale di Ripresa e Resilienza - Progetti Finanziati",
        description: "Elenco completo dei progetti finanziati dal PNRR con dettaglio degli importi, settori di intervento e stato di avanzamento.",
        source: "innovazione",
        category: "economia",
        date: "2024-01-20",
        url: "https://innovazione.gov.it/pnrr/progetti",
        tags: &["PNRR", "finanziamenti", "progetti", "economia", "innovazione"],
    },
    Row {
        id: 5,
        title: "Codice dell'Amministrazione Digitale - CAD",
        description: "Testo aggiornato del Codice dell'Amministrazione Digitale con le ultime modifiche legislative. Disciplina l'uso delle tecnologie ICT nella PA.",
        source: "normattiva",
        category: "digitale",
        date: "2005-03-07",
        url: "https://www.normattiva.it/uri-res/N2Ls?urn:nir:stato:decreto.legislativo:2005-03-07;82",
        tags: &["digitale", "CAD", "tecnologia", "ICT", "amministrazione"],
    },
    Row {
        id: 6,
        title: "Spesa Pubblica per Regione - Bilancio dello Stato",
        description: "Analisi della spesa pubblica suddivisa per regione e per categoria di spesa. Dati aggiornati annualmente dal MEF.",
        source: "datigov",
        category: "economia",
        date: "2023-12-31",
        url: "https://www.dati.gov.it/dataset/spesa-pubblica-regioni",
        tags: &["spesa pubblica", "bilancio", "MEF", "regioni", "finanze"],
    },
    Row {
        id: 7,
        title: "Gazzetta Ufficiale - Serie Generale n.45 del 2024",
        description: "Pubblicazione della Gazzetta Ufficiale contenente decreti ministeriali, bandi di concorso e circolari della PA.",
        source: "gazzetta",
        category: "normativa",
        date: "2024-02-23",
        url: "https://www.gazzettaufficiale.it/atto/serie_generale/caricaDettaglioAtto/originario?atto.dataPubblicazioneGazzetta=2024-02-23",
        tags: &["gazzetta ufficiale", "decreti", "concorsi", "bandi"],
    },
    Row {
        id: 8,
        title: "Trasporti Pubblici Locali - Dati di Mobilità",
        description: "Dataset contenente informazioni su orari, percorsi e utilizzo dei trasporti pubblici locali nelle principali città italiane.",
        source: "datigov",
        category: "trasporti",
        date: "2024-01-10",
        url: "https://www.dati.gov.it/dataset/trasporti-pubblici-locali",
        tags: &["trasporti", "mobilità", "TPL", "orari", "città"],
    },
    Row {
        id: 9,
        title: "Strategia Nazionale per le Competenze Digitali",
        description: "Documento programmatico del Governo per lo sviluppo delle competenze digitali dei cittadini e dei dipendenti pubblici.",
        source: "innovazione",
        category: "digitale",
        date: "2023-07-15",
        url: "https://innovazione.gov.it/strategia-digitale/",
        tags: &["competenze digitali", "formazione", "strategia", "PA digitale"],
    },
    Row {
        id: 10,
        title: "Scuole Italiane - Anagrafica e Dati Statistici",
        description: "Elenco completo delle scuole italiane con dati su iscrizioni, personale docente, strutture e risultati scolastici.",
        source: "scuola",
        category: "istruzione",
        date: "2023-09-01",
        url: "https://dati.istruzione.it/opendata/dataset/scuole-anagrafica",
        tags: &["scuole", "istruzione", "studenti", "docenti", "educazione"],
    },
    Row {
        id: 11,
        title: "Contratti Pubblici sopra soglia - ANAC",
        description: "Database dei contratti pubblici sopra soglia europea gestito dall'Autorità Nazionale Anticorruzione.",
        source: "anac",
        category: "appalti",
        date: "2024-02-15",
        url: "https://dati.anticorruzione.it/superset/dashboard/contratti",
        tags: &["appalti", "contratti", "ANAC", "trasparenza", "anticorruzione"],
    },
    Row {
        id: 12,
        title: "Dati ambientali - Annuario ISPRA",
        description: "Annuario dei dati ambientali ISPRA con informazioni su qualità aria, acqua, biodiversità e clima.",
        source: "ispra",
        category: "ambiente",
        date: "2023-12-01",
        url: "https://www.isprambiente.gov.it/it/pubblicazioni/stato-dellambiente",
        tags: &["ambiente", "ISPRA", "clima", "biodiversità", "inquinamento"],
    },
    Row {
        id: 13,
        title: "Open Coesione - Progetti territoriali",
        description: "Monitoraggio dei progetti finanziati dalle politiche di coesione europea e nazionale sul territorio.",
        source: "opencoesione",
        category: "economia",
        date: "2024-01-25",
        url: "https://opencoesione.gov.it/it/progetti/",
        tags: &["coesione", "fondi europei", "progetti", "territorio", "sviluppo"],
    },
    Row {
        id: 14,
        title: "Statistiche Istat - Indicatori demografici",
        description: "Indicatori demografici nazionali e regionali da I.Stat: popolazione, natalità, mortalità, migrazioni.",
        source: "istat",
        category: "demografia",
        date: "2024-02-10",
        url: "http://dati.istat.it/Index.aspx?DataSetCode=DCIS_POPRES1",
        tags: &["istat", "demografia", "statistiche", "popolazione", "territorio"],
    },
    Row {
        id: 15,
        title: "Indice PA - Enti e uffici pubblici",
        description: "Indice delle pubbliche amministrazioni italiane con informazioni su enti, uffici, contatti e servizi.",
        source: "ipa",
        category: "amministrazione",
        date: "2024-02-01",
        url: "https://indicepa.gov.it/ipa-dati/dataset",
        tags: &["IPA", "enti pubblici", "amministrazione", "anagrafica", "PA"],
    },
    Row {
        id: 16,
        title: "Dati sanitari - Ministero della Salute",
        description: "Dataset aperti su strutture sanitarie, prestazioni, farmaci e indicatori di salute pubblica.",
        source: "salute",
        category: "salute",
        date: "2024-01-30",
        url: "https://www.dati.salute.gov.it/dati/dettaglioDataset/menu",
        tags: &["salute", "sanità", "ospedali", "farmaci", "prevenzione"],
    },
    Row {
        id: 17,
        title: "Open Cantieri - Infrastrutture in costruzione",
        description: "Monitoraggio delle opere pubbliche e infrastrutture in fase di realizzazione sul territorio nazionale.",
        source: "opencantieri",
        category: "infrastrutture",
        date: "2024-02-05",
        url: "https://opencantieri.mit.gov.it/open-data",
        tags: &["infrastrutture", "cantieri", "opere pubbliche", "MIT", "monitoraggio"],
    },
    Row {
        id: 18,
        title: "INPS Open Data - Prestazioni previdenziali",
        description: "Dati aperti INPS su pensioni, ammortizzatori sociali, prestazioni assistenziali e previdenza.",
        source: "inps",
        category: "lavoro",
        date: "2024-01-20",
        url: "https://www.inps.it/opendata",
        tags: &["INPS", "pensioni", "previdenza", "assistenza", "lavoro"],
    },
    Row {
        id: 19,
        title: "INAIL - Dati su infortuni e malattie professionali",
        description: "Open data INAIL su infortuni sul lavoro, malattie professionali e prevenzione nei luoghi di lavoro.",
        source: "inail",
        category: "lavoro",
        date: "2024-01-15",
        url: "https://www.inail.it/opendata",
        tags: &["INAIL", "infortuni", "sicurezza", "lavoro", "prevenzione"],
    },
    Row {
        id: 20,
        title: "Geoportale Nazionale - Dati territoriali",
        description: "Repertorio Nazionale dei Dati Territoriali con cartografie, ortofoto e dati geografici.",
        source: "geoportale",
        category: "territorio",
        date: "2024-02-08",
        url: "https://geodati.gov.it/geoportale/",
        tags: &["cartografia", "territorio", "GIS", "mappe", "geoportale"],
    },
];

/// The bundled records, in catalogue order.
pub fn bundled_results() -> Vec<SearchResult> {
    ROWS.iter()
        .map(|row| SearchResult {
            id: ResultId::Number(row.id),
            title: row.title.to_owned(),
            description: row.description.to_owned(),
            source: row.source.to_owned(),
            category: row.category.to_owned(),
            date: row.date.to_owned(),
            url: row.url.to_owned(),
            tags: row.tags.iter().map(|t| (*t).to_owned()).collect(),
        })
        .collect()
}
