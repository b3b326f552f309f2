//! Facility settings document.
//!
//! All tunable behaviour lives in a single document persisted as JSON:
//! opening hours and slot length, night surcharges, branding, the rules text
//! shown to members, and the assistant integration.

use serde::{Deserialize, Serialize};

use crate::courts::{Court, PriceCategory};
use crate::errors::{CourtError, CourtResult};
use crate::slots::{SlotGrid, TimeOfDay};
use crate::validation::{mask_secret, require, validate_email, validate_hex_color};

pub const MIN_SLOT_MINUTES: u16 = 30;
pub const MAX_SLOT_MINUTES: u16 = 120;
pub const SLOT_MINUTES_STEP: u16 = 15;
pub const MAX_RESERVATIONS_PER_DAY: u8 = 5;
pub const MAX_CAROUSEL_IMAGES: usize = 3;

pub const DEFAULT_RULES_TEXT: &str = "1. Cada usuario puede realizar máximo 1 reserva por día.\n\
2. Las reservas tienen una duración máxima de 1 hora.\n\
3. Las reservas nocturnas requieren pago adicional.\n\
4. Se debe respetar el horario reservado.\n\
5. Cualquier daño a las instalaciones será responsabilidad del usuario.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSettings {
    pub open: TimeOfDay,
    pub close: TimeOfDay,
    pub slot_duration_minutes: u16,
    pub max_reservations_per_day: u8,
    pub require_night_payment: bool,
    pub night_start: TimeOfDay,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            open: TimeOfDay::from_hours(6),
            close: TimeOfDay::from_hours(22),
            slot_duration_minutes: 60,
            max_reservations_per_day: 1,
            require_night_payment: true,
            night_start: TimeOfDay::from_hours(19),
        }
    }
}

impl ScheduleSettings {
    pub fn validate(&self) -> CourtResult<()> {
        if self.open >= self.close {
            return Err(CourtError::Validation(
                "Opening time must be before closing time".to_string(),
            ));
        }
        if !(MIN_SLOT_MINUTES..=MAX_SLOT_MINUTES).contains(&self.slot_duration_minutes)
            || self.slot_duration_minutes % SLOT_MINUTES_STEP != 0
        {
            return Err(CourtError::Validation(format!(
                "Slot duration must be between {} and {} minutes in steps of {}",
                MIN_SLOT_MINUTES, MAX_SLOT_MINUTES, SLOT_MINUTES_STEP
            )));
        }
        if !(1..=MAX_RESERVATIONS_PER_DAY).contains(&self.max_reservations_per_day) {
            return Err(CourtError::Validation(format!(
                "Reservations per day must be between 1 and {}",
                MAX_RESERVATIONS_PER_DAY
            )));
        }
        Ok(())
    }

    pub fn grid(&self) -> SlotGrid {
        SlotGrid {
            open: self.open,
            close: self.close,
            duration_minutes: self.slot_duration_minutes,
            night_start: self.night_start,
        }
    }
}

/// Night surcharge per price category, in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightPricing {
    pub tennis_cents: i64,
    pub football_cents: i64,
    pub basketball_cents: i64,
    pub volleyball_cents: i64,
}

impl Default for NightPricing {
    fn default() -> Self {
        Self {
            tennis_cents: 1500,
            football_cents: 2000,
            basketball_cents: 1500,
            volleyball_cents: 1500,
        }
    }
}

impl NightPricing {
    pub fn validate(&self) -> CourtResult<()> {
        let prices = [
            self.tennis_cents,
            self.football_cents,
            self.basketball_cents,
            self.volleyball_cents,
        ];
        if prices.iter().any(|price| *price < 0) {
            return Err(CourtError::Validation("Prices cannot be negative".to_string()));
        }
        Ok(())
    }

    pub fn price_for(&self, court: Court) -> i64 {
        match court.price_category() {
            PriceCategory::Tennis => self.tennis_cents,
            PriceCategory::Football => self.football_cents,
            PriceCategory::Basketball => self.basketball_cents,
            PriceCategory::Volleyball => self.volleyball_cents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    pub app_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub background_color: String,
    pub logo_url: Option<String>,
    #[serde(default)]
    pub carousel_images: Vec<String>,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            app_name: "Esmeralda Play".to_string(),
            contact_email: "aso.urbpuntaesmeralda@gmail.com".to_string(),
            contact_phone: "+593 968838776".to_string(),
            primary_color: "#10b981".to_string(),
            secondary_color: "#065f46".to_string(),
            background_color: "#ecfdf5".to_string(),
            logo_url: None,
            carousel_images: Vec::new(),
        }
    }
}

impl Branding {
    pub fn validate(&self) -> CourtResult<()> {
        require("app_name", &self.app_name)?;
        validate_email(&self.contact_email)?;
        require("contact_phone", &self.contact_phone)?;
        validate_hex_color("primary_color", &self.primary_color)?;
        validate_hex_color("secondary_color", &self.secondary_color)?;
        validate_hex_color("background_color", &self.background_color)?;
        if self.carousel_images.len() > MAX_CAROUSEL_IMAGES {
            return Err(CourtError::Validation(format!(
                "At most {} carousel images are allowed",
                MAX_CAROUSEL_IMAGES
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationSettings {
    pub api_key: Option<String>,
    pub enabled: bool,
}

impl IntegrationSettings {
    pub fn validate(&self) -> CourtResult<()> {
        if self.enabled && self.api_key.as_deref().is_none_or(|key| key.trim().is_empty()) {
            return Err(CourtError::Validation(
                "An API key is required to enable the integration".to_string(),
            ));
        }
        Ok(())
    }

    pub fn view(&self) -> IntegrationView {
        IntegrationView {
            api_key: self.api_key.as_deref().map(mask_secret),
            enabled: self.enabled,
        }
    }
}

/// Integration settings with the key masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationView {
    pub api_key: Option<String>,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub schedule: ScheduleSettings,
    #[serde(default)]
    pub pricing: NightPricing,
    #[serde(default)]
    pub branding: Branding,
    #[serde(default = "default_rules_text")]
    pub rules_text: String,
    #[serde(default)]
    pub integrations: IntegrationSettings,
}

fn default_rules_text() -> String {
    DEFAULT_RULES_TEXT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schedule: ScheduleSettings::default(),
            pricing: NightPricing::default(),
            branding: Branding::default(),
            rules_text: default_rules_text(),
            integrations: IntegrationSettings::default(),
        }
    }
}

impl Settings {
    /// Everything members are allowed to see.
    pub fn public_view(&self) -> PublicSettings {
        PublicSettings {
            schedule: self.schedule.clone(),
            pricing: self.pricing.clone(),
            branding: self.branding.clone(),
            rules_text: self.rules_text.clone(),
        }
    }

    pub fn admin_view(&self) -> AdminSettings {
        AdminSettings {
            schedule: self.schedule.clone(),
            pricing: self.pricing.clone(),
            branding: self.branding.clone(),
            rules_text: self.rules_text.clone(),
            integrations: self.integrations.view(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicSettings {
    pub schedule: ScheduleSettings,
    pub pricing: NightPricing,
    pub branding: Branding,
    pub rules_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSettings {
    pub schedule: ScheduleSettings,
    pub pricing: NightPricing,
    pub branding: Branding,
    pub rules_text: String,
    pub integrations: IntegrationView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRulesRequest {
    pub rules_text: String,
}

impl UpdateRulesRequest {
    pub fn validate(&self) -> CourtResult<String> {
        Ok(require("rules_text", &self.rules_text)?.to_string())
    }
}
