//! Static locale tables for the two supported interface languages.
//!
//! The language also travels with each query so the service answers in the
//! user's language; it never changes the payload structure.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    Spanish,
    English,
}

impl Language {
    /// Parse a language tag ("es"/"en", or a longer tag like "es-ES").
    pub fn parse(tag: &str) -> Option<Language> {
        match tag.trim().to_lowercase().split(['-', '_']).next() {
            Some("es") => Some(Language::Spanish),
            Some("en") => Some(Language::English),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Spanish => "es",
            Language::English => "en",
        }
    }

    pub fn toggled(&self) -> Language {
        match self {
            Language::Spanish => Language::English,
            Language::English => Language::Spanish,
        }
    }
}

/// Interface strings for one language.
pub struct UiText {
    pub app_title: &'static str,
    pub app_subtitle: &'static str,
    pub loading_messages: &'static [&'static str],
    pub loading_hint: &'static str,
    pub stop_search: &'static str,
    pub new_search: &'static str,
    pub no_results_found: &'static str,
    pub analysis_title: &'static str,
    pub identified_records: &'static str,
    pub location_filter_label: &'static str,
    pub data_not_available: &'static str,
    pub error_auth: &'static str,
    pub error_transient: &'static str,
    pub onboarding: &'static [&'static str],
    pub form_first_name: &'static str,
    pub form_last_name1: &'static str,
    pub form_last_name2: &'static str,
    pub form_service_number: &'static str,
    pub form_fuzzy: &'static str,
    pub form_exact: &'static str,
    pub form_investigate: &'static str,
    pub report_copied: &'static str,
    pub report_saved: &'static str,
    pub sources_title: &'static str,
    pub grounding_title: &'static str,
    pub key_hints_form: &'static str,
    pub key_hints_results: &'static str,
}

static SPANISH: UiText = UiText {
    app_title: "MemoriaViva",
    app_subtitle: "Investigador de Memoria Histórica Española",
    loading_messages: &[
        "Rastreando archivos históricos...",
        "Localizando signaturas oficiales...",
        "Cotejando registros de registros...",
        "Extrayendo guías de búsqueda manual...",
        "Analizando fondos documentales...",
    ],
    loading_hint: "Investigación en profundidad: este proceso puede demorar hasta 2 minutos.",
    stop_search: "Detener Búsqueda",
    new_search: "Nueva Investigación",
    no_results_found: "No se han encontrado registros específicos coincidentes. Consulte el análisis histórico superior para más contexto.",
    analysis_title: "Análisis de la Investigación",
    identified_records: "Registros Identificados",
    location_filter_label: "Filtrar por Ubicación",
    data_not_available: "Dato no disponible en la fuente",
    error_auth: "Credencial del servicio rechazada. Verifique la clave de acceso configurada.",
    error_transient: "Error en la conexión con los archivos estatales. Por favor, reintente en unos segundos.",
    onboarding: &[
        "Introduzca el nombre y apellidos de la persona. El primer apellido es obligatorio.",
        "Use el Número de Expediente o Chapa Militar si lo conoce para resultados precisos.",
        "La 'Búsqueda Flexible' ayuda a encontrar registros con variaciones ortográficas comunes en la época.",
    ],
    form_first_name: "Nombre (Opcional)",
    form_last_name1: "Primer Apellido",
    form_last_name2: "Segundo Apellido (Opcional)",
    form_service_number: "Nº Expediente / Chapa (Opcional)",
    form_fuzzy: "Búsqueda Flexible (Fuzzy)",
    form_exact: "Búsqueda Exacta",
    form_investigate: "Investigar",
    report_copied: "Informe copiado al portapapeles",
    report_saved: "Informe guardado",
    sources_title: "Fuentes Oficiales",
    grounding_title: "Citas del Servicio",
    key_hints_form: "Tab: campo | F2: fuzzy | F3: idioma | Enter: investigar | Ctrl+C: salir",
    key_hints_results: "↑/↓: registro | Espacio: informe | 1-7: categoría | /: ubicación | Ctrl+Y: copiar | Ctrl+S: guardar | Esc: volver",
};

static ENGLISH: UiText = UiText {
    app_title: "MemoriaViva",
    app_subtitle: "Spanish Historical Memory Researcher",
    loading_messages: &[
        "Tracing historical archives...",
        "Locating official signatures...",
        "Cross-referencing record logs...",
        "Extracting manual search guides...",
        "Analyzing documentary collections...",
    ],
    loading_hint: "In-depth research: this process can take up to 2 minutes.",
    stop_search: "Stop Search",
    new_search: "New Investigation",
    no_results_found: "No specific matching records were found. Please refer to the historical analysis above for more context.",
    analysis_title: "Investigation Analysis",
    identified_records: "Identified Records",
    location_filter_label: "Filter by Location",
    data_not_available: "Data not available in the source",
    error_auth: "Service credential rejected. Check the configured access key.",
    error_transient: "Error connecting to the state archives. Please retry in a few seconds.",
    onboarding: &[
        "Enter the person's name and surnames. The first surname is required.",
        "Use the Military Service ID if known for precise results.",
        "Flexible search helps with historical spelling variations.",
    ],
    form_first_name: "First Name (Optional)",
    form_last_name1: "First Surname",
    form_last_name2: "Second Surname (Optional)",
    form_service_number: "Military Service ID (Optional)",
    form_fuzzy: "Flexible Search (Fuzzy)",
    form_exact: "Exact Match",
    form_investigate: "Investigate",
    report_copied: "Report copied to clipboard",
    report_saved: "Report saved",
    sources_title: "Official Sources",
    grounding_title: "Service Citations",
    key_hints_form: "Tab: field | F2: fuzzy | F3: language | Enter: investigate | Ctrl+C: quit",
    key_hints_results: "↑/↓: record | Space: report | 1-7: category | /: location | Ctrl+Y: copy | Ctrl+S: save | Esc: back",
};

/// Look up the string table for a language.
pub fn translations(language: Language) -> &'static UiText {
    match language {
        Language::Spanish => &SPANISH,
        Language::English => &ENGLISH,
    }
}
