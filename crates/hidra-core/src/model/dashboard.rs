// ── Water-quality dashboard view ──
//
// The view the dashboard poller patches in place. Cards start empty and
// only change when the endpoint reports a value for them, so a partial
// payload never blanks a card.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use hidra_api::models::{DashboardResponse, SensorData};

/// Placeholder for a card with no reading yet.
pub const NO_VALUE: &str = "--";

/// The nine monitored water-quality parameters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Temperatura,
    Ph,
    Oxigenio,
    Dbo,
    Coliformes,
    Nitrogenio,
    Fosforo,
    Turbidez,
    Solidos,
}

/// Severity class of a reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    #[default]
    Normal,
    Alert,
    Danger,
}

enum Limits {
    /// Worse as the value grows.
    Above { warning: f64, critical: f64 },
    /// Worse as the value drops.
    Below { warning: f64, critical: f64 },
    /// Acceptable only inside a band.
    Band {
        warning: (f64, f64),
        critical: (f64, f64),
    },
}

impl Parameter {
    pub fn label(self) -> &'static str {
        match self {
            Self::Temperatura => "Temperatura",
            Self::Ph => "pH",
            Self::Oxigenio => "Oxigênio Dissolvido",
            Self::Dbo => "DBO",
            Self::Coliformes => "Coliformes",
            Self::Nitrogenio => "Nitrogênio Total",
            Self::Fosforo => "Fósforo Total",
            Self::Turbidez => "Turbidez",
            Self::Solidos => "Sólidos Totais",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::Temperatura => "°C",
            Self::Ph => "",
            Self::Oxigenio | Self::Dbo | Self::Nitrogenio | Self::Fosforo | Self::Solidos => {
                "mg/L"
            }
            Self::Coliformes => "NMP/100mL",
            Self::Turbidez => "NTU",
        }
    }

    /// Render a reading with this parameter's precision.
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Coliformes | Self::Solidos => format!("{:.0}", round_half_up(value)),
            Self::Nitrogenio => format!("{value:.2}"),
            Self::Fosforo => format!("{value:.3}"),
            Self::Temperatura | Self::Ph | Self::Oxigenio | Self::Dbo | Self::Turbidez => {
                format!("{value:.1}")
            }
        }
    }

    /// Classify a reading against the water-quality limits.
    pub fn alert(self, value: f64) -> AlertLevel {
        match self.limits() {
            Limits::Above { warning, critical } => {
                if value > critical {
                    AlertLevel::Danger
                } else if value > warning {
                    AlertLevel::Alert
                } else {
                    AlertLevel::Normal
                }
            }
            Limits::Below { warning, critical } => {
                if value < critical {
                    AlertLevel::Danger
                } else if value < warning {
                    AlertLevel::Alert
                } else {
                    AlertLevel::Normal
                }
            }
            Limits::Band { warning, critical } => {
                if value < critical.0 || value > critical.1 {
                    AlertLevel::Danger
                } else if value < warning.0 || value > warning.1 {
                    AlertLevel::Alert
                } else {
                    AlertLevel::Normal
                }
            }
        }
    }

    fn limits(self) -> Limits {
        match self {
            Self::Temperatura => Limits::Above {
                warning: 30.0,
                critical: 35.0,
            },
            Self::Ph => Limits::Band {
                warning: (6.5, 8.5),
                critical: (6.0, 9.0),
            },
            Self::Oxigenio => Limits::Below {
                warning: 6.0,
                critical: 4.0,
            },
            Self::Dbo => Limits::Above {
                warning: 5.0,
                critical: 10.0,
            },
            Self::Coliformes => Limits::Above {
                warning: 100.0,
                critical: 1000.0,
            },
            Self::Nitrogenio => Limits::Above {
                warning: 2.18,
                critical: 3.7,
            },
            Self::Fosforo => Limits::Above {
                warning: 0.1,
                critical: 0.15,
            },
            Self::Turbidez => Limits::Above {
                warning: 40.0,
                critical: 100.0,
            },
            Self::Solidos => Limits::Above {
                warning: 300.0,
                critical: 500.0,
            },
        }
    }

    /// Pick this parameter's reading out of a payload.
    pub fn reading(self, data: &SensorData) -> Option<f64> {
        match self {
            Self::Temperatura => data.temperatura,
            Self::Ph => data.ph,
            Self::Oxigenio => data.oxigenio,
            Self::Dbo => data.dbo,
            Self::Coliformes => data.coliformes,
            Self::Nitrogenio => data.nitrogenio,
            Self::Fosforo => data.fosforo,
            Self::Turbidez => data.turbidez,
            Self::Solidos => data.solidos,
        }
    }
}

/// One sensor tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorCard {
    pub parameter: Parameter,
    pub value: Option<f64>,
    pub display: String,
    pub alert: AlertLevel,
}

impl SensorCard {
    fn empty(parameter: Parameter) -> Self {
        Self {
            parameter,
            value: None,
            display: NO_VALUE.into(),
            alert: AlertLevel::Normal,
        }
    }

    fn set(&mut self, value: f64) {
        self.value = Some(value);
        self.display = self.parameter.format(value);
        self.alert = self.parameter.alert(value);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IqaReading {
    pub value: f64,
    pub classification: String,
    pub css_class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloodRisk {
    pub level: String,
    pub css_class: String,
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub cards: Vec<SensorCard>,
    pub iqa: Option<IqaReading>,
    pub flood_risk: Option<FloodRisk>,
    pub firebase_connected: bool,
    pub data_source: Option<String>,
    /// Server-side timestamp of the data, verbatim.
    pub server_timestamp: Option<String>,
    /// Timestamp shown in the map popup.
    pub popup_updated_at: Option<DateTime<Utc>>,
    /// When the last successful poll landed.
    pub last_update: Option<DateTime<Utc>>,
    /// Why the last poll failed; cleared by the next success.
    pub last_error: Option<String>,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self {
            cards: Parameter::iter().map(SensorCard::empty).collect(),
            iqa: None,
            flood_risk: None,
            firebase_connected: false,
            data_source: None,
            server_timestamp: None,
            popup_updated_at: None,
            last_update: None,
            last_error: None,
        }
    }
}

impl DashboardView {
    pub fn card(&self, parameter: Parameter) -> Option<&SensorCard> {
        self.cards.iter().find(|c| c.parameter == parameter)
    }

    /// Patch the view with a successful payload. Absent readings keep their
    /// previous value.
    pub fn apply(&mut self, payload: &DashboardResponse, now: DateTime<Utc>) {
        for card in &mut self.cards {
            if let Some(value) = card.parameter.reading(&payload.sensor_data) {
                card.set(value);
            }
        }

        if let Some(iqa) = &payload.iqa {
            self.iqa = Some(IqaReading {
                value: iqa.valor,
                classification: iqa.classificacao.clone(),
                css_class: iqa.css_class.clone(),
            });
        }
        if let Some(risk) = &payload.flood_risk {
            self.flood_risk = Some(FloodRisk {
                level: risk.level.clone(),
                css_class: risk.css_class.clone(),
            });
        }

        self.firebase_connected = payload.firebase_connected;
        if payload.data_source.is_some() {
            self.data_source.clone_from(&payload.data_source);
        }
        if payload.timestamp.is_some() {
            self.server_timestamp.clone_from(&payload.timestamp);
        }
        self.popup_updated_at = Some(now);
        self.last_update = Some(now);
        self.last_error = None;
    }
}

/// Whole-number rounding with ties toward positive infinity (`2.5 -> 3`,
/// `-2.5 -> -2`). Never yields `-0`.
fn round_half_up(value: f64) -> f64 {
    let rounded = (value + 0.5).floor();
    if rounded.abs() < 0.5 { 0.0 } else { rounded }
}
