//! Capability discovery over a host's option surface.
//!
//! The host implements [`OptionSurface`], handing over one [`OptionHandle`]
//! per named, live-bound value cell. Discovery converts eligible handles
//! into uniform [`ToggleSetting`]s and [`SliderSetting`]s:
//!
//! - every boolean cell becomes a toggle, with display names resolved from
//!   the handle caption, the override table, or a camel-case split of the
//!   internal name;
//! - numeric cells become sliders only when a caption or curated display
//!   name exists, with ranges resolved from the handle, the curated range
//!   table, or a conservative fallback, then normalized.
//!
//! A malfunctioning handle is skipped with a debug log; discovery never
//! propagates errors past its own boundary.

mod tables;

use crate::slider::{FloatGetter, FloatSetter, SliderSetting};
use crate::toggle::ToggleSetting;
use anyhow::Result;

/// An enumerable collection of named, live-bound value cells exposed by
/// the host. `options()` returns fresh handles on every call; discovery
/// consumes them.
pub trait OptionSurface {
    fn options(&self) -> Vec<OptionHandle>;
}

/// A single host option: a name, an optional human caption, an optional
/// embedded value range, and the typed value cell.
pub struct OptionHandle {
    pub name: String,
    pub caption: Option<String>,
    pub range: Option<OptionRange>,
    pub cell: OptionCell,
}

/// Embedded min/max/step hints from the host. Any of the three may be
/// absent; missing fields fall through to the curated table or defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

/// The live value cell of a host option, in its native representation.
pub enum OptionCell {
    Bool {
        get: Box<dyn Fn() -> Result<bool>>,
        set: Box<dyn Fn(bool) -> Result<()>>,
    },
    Int {
        get: Box<dyn Fn() -> Result<i64>>,
        set: Box<dyn Fn(i64) -> Result<()>>,
    },
    Float {
        get: Box<dyn Fn() -> Result<f32>>,
        set: Box<dyn Fn(f32) -> Result<()>>,
    },
    Double {
        get: Box<dyn Fn() -> Result<f64>>,
        set: Box<dyn Fn(f64) -> Result<()>>,
    },
}

impl OptionHandle {
    /// Convenience constructor for a boolean cell.
    pub fn bool_option(
        name: impl Into<String>,
        get: impl Fn() -> Result<bool> + 'static,
        set: impl Fn(bool) -> Result<()> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            caption: None,
            range: None,
            cell: OptionCell::Bool {
                get: Box::new(get),
                set: Box::new(set),
            },
        }
    }

    /// Convenience constructor for a double cell.
    pub fn double_option(
        name: impl Into<String>,
        get: impl Fn() -> Result<f64> + 'static,
        set: impl Fn(f64) -> Result<()> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            caption: None,
            range: None,
            cell: OptionCell::Double {
                get: Box::new(get),
                set: Box::new(set),
            },
        }
    }

    /// Convenience constructor for an integer cell.
    pub fn int_option(
        name: impl Into<String>,
        get: impl Fn() -> Result<i64> + 'static,
        set: impl Fn(i64) -> Result<()> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            caption: None,
            range: None,
            cell: OptionCell::Int {
                get: Box::new(get),
                set: Box::new(set),
            },
        }
    }

    /// Convenience constructor for a single-precision float cell.
    pub fn float_option(
        name: impl Into<String>,
        get: impl Fn() -> Result<f32> + 'static,
        set: impl Fn(f32) -> Result<()> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            caption: None,
            range: None,
            cell: OptionCell::Float {
                get: Box::new(get),
                set: Box::new(set),
            },
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_range(mut self, range: OptionRange) -> Self {
        self.range = Some(range);
        self
    }
}

/// Discover every boolean option on the surface as a toggle setting.
pub fn discover_toggles(surface: &dyn OptionSurface) -> Vec<ToggleSetting> {
    log::info!("Starting host toggle discovery...");

    let mut settings = Vec::new();
    for handle in surface.options() {
        if let Some(setting) = try_extract_toggle(handle) {
            log::debug!(
                "Discovered toggle: {} ({})",
                setting.id,
                setting.display_name
            );
            settings.push(setting);
        }
    }

    log::info!("Discovered {} host toggle settings", settings.len());
    settings
}

fn try_extract_toggle(handle: OptionHandle) -> Option<ToggleSetting> {
    let OptionCell::Bool { get, set } = handle.cell else {
        return None;
    };

    // Probe the cell once; a malfunctioning member is skipped, never fatal
    if let Err(e) = get() {
        log::debug!("Failed to read option '{}': {e}", handle.name);
        return None;
    }

    let display_name = handle
        .caption
        .or_else(|| tables::toggle_name_override(&handle.name).map(str::to_string))
        .unwrap_or_else(|| name_to_display_name(&handle.name));
    let category = determine_category(&handle.name, &display_name);

    Some(
        ToggleSetting::new(
            format!("host.{}", handle.name),
            display_name.clone(),
            category,
            get,
            set,
        )
        .with_description(format!("Host setting: {display_name}")),
    )
}

/// Discover numeric options on the surface as slider settings.
///
/// Unlike toggles, sliders require a resolvable human display name (caption
/// or override entry); there is no generic-name fallback.
pub fn discover_sliders(surface: &dyn OptionSurface) -> Vec<SliderSetting> {
    log::info!("Starting host slider discovery...");

    let mut settings = Vec::new();
    for handle in surface.options() {
        if let Some(setting) = try_extract_slider(handle) {
            log::debug!(
                "Discovered slider: {} ({})",
                setting.id,
                setting.display_name
            );
            settings.push(setting);
        }
    }

    log::info!("Discovered {} host slider settings", settings.len());
    settings
}

fn try_extract_slider(handle: OptionHandle) -> Option<SliderSetting> {
    // Coerce the native numeric representation to a uniform f64 boundary
    let (get, set, integer): (FloatGetter, FloatSetter, bool) = match handle.cell {
        OptionCell::Int { get, set } => (
            Box::new(move || get().map(|v| v as f64)),
            Box::new(move |v: f64| set(v.round() as i64)),
            true,
        ),
        OptionCell::Float { get, set } => (
            Box::new(move || get().map(f64::from)),
            Box::new(move |v: f64| set(v as f32)),
            false,
        ),
        OptionCell::Double { get, set } => (get, set, false),
        OptionCell::Bool { .. } => return None,
    };

    let current = match get() {
        Ok(value) => value,
        Err(e) => {
            log::debug!("Failed to read option '{}': {e}", handle.name);
            return None;
        }
    };

    // Sliders are limited to known, vetted options: no generic-name fallback
    let display_name = handle
        .caption
        .or_else(|| tables::slider_name_override(&handle.name).map(str::to_string))?;
    let category = determine_category(&handle.name, &display_name);

    let (min, max, step) = resolve_range(&handle.name, handle.range, current, integer);

    Some(
        SliderSetting::new(
            format!("host.{}", handle.name),
            display_name.clone(),
            category,
            min,
            max,
            step,
            get,
            set,
        )
        .with_description(format!("Host setting: {display_name}")),
    )
}

/// Resolve and normalize a slider's `(min, max, step)`.
///
/// Each field cascades independently: embedded handle range, then the
/// curated per-name table, then `{0, max(1, current), 0.1}`. The result is
/// normalized so that `max >= current`, `max > min`, `0 < step <= max - min`,
/// and integer-backed options get whole-number steps (floor 1) with `max`
/// rounded up.
fn resolve_range(
    name: &str,
    embedded: Option<OptionRange>,
    current: f64,
    integer: bool,
) -> (f64, f64, f64) {
    let curated = tables::curated_range(name);
    let embedded = embedded.unwrap_or_default();

    let min = embedded
        .min
        .or(curated.map(|(min, _, _)| min))
        .unwrap_or(0.0);
    let max = embedded
        .max
        .or(curated.map(|(_, max, _)| max))
        .unwrap_or_else(|| current.max(1.0));
    let step = embedded
        .step
        .or(curated.map(|(_, _, step)| step))
        .unwrap_or(0.1);

    normalize_range(min, max, step, current, integer)
}

fn normalize_range(min: f64, max: f64, step: f64, current: f64, integer: bool) -> (f64, f64, f64) {
    let mut max = max.max(current);
    if max <= min {
        max = min + 1.0;
    }

    let mut step = if step > 0.0 { step } else { 0.1 };
    if integer {
        max = max.ceil();
        step = step.round().max(1.0);
    }
    step = step.min(max - min);

    (min, max, step)
}

/// Camel-case internal name → words: split before uppercase letters,
/// capitalize the first letter. `fooBar` becomes `Foo Bar`.
fn name_to_display_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    for (index, ch) in name.chars().enumerate() {
        if index == 0 {
            result.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            result.push(' ');
            result.push(ch);
        } else {
            result.push(ch);
        }
    }
    result
}

/// First matching substring rule wins, tested against the lower-cased
/// internal name and resolved display name; defaults to "General".
fn determine_category(name: &str, display_name: &str) -> String {
    let name = name.to_lowercase();
    let display_name = display_name.to_lowercase();
    for (pattern, category) in tables::CATEGORY_RULES {
        if name.contains(pattern) || display_name.contains(pattern) {
            return (*category).to_string();
        }
    }
    "General".to_string()
}
