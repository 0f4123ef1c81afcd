//! Curated naming, categorization, and range tables for discovery.
//!
//! Keyed by the host's internal option names. Hosts that expose captions
//! on their option handles bypass the name overrides entirely.

/// Display name overrides for toggle options whose internal names don't
/// read well after the generic camel-case split.
pub(crate) const DISPLAY_NAME_OVERRIDES: &[(&str, &str)] = &[
    ("hideGui", "Hide GUI"),
    ("bobView", "View Bobbing"),
    ("autoJump", "Auto Jump"),
    ("fullscreen", "Fullscreen"),
    ("vsync", "VSync"),
    ("touchscreen", "Touchscreen Mode"),
    ("invertYMouse", "Invert Mouse"),
    ("discreteMouseScroll", "Discrete Scrolling"),
    ("reducedDebugInfo", "Reduced Debug Info"),
    ("showSubtitles", "Show Subtitles"),
    ("directionalAudio", "Directional Audio"),
    ("chatColors", "Chat Colors"),
    ("chatLinks", "Chat Links"),
    ("autoSuggestions", "Auto Suggestions"),
    ("useNativeTransport", "Use Native Transport"),
    ("pauseOnLostFocus", "Pause on Lost Focus"),
    ("advancedItemTooltips", "Advanced Tooltips"),
    ("highContrast", "High Contrast"),
    ("rawMouseInput", "Raw Mouse Input"),
    ("hideLightningFlash", "Hide Lightning Flash"),
    ("entityShadows", "Entity Shadows"),
    ("forceUnicodeFont", "Force Unicode Font"),
];

/// Display name overrides for slider options. Sliders with neither a
/// caption nor an entry here are deliberately skipped: sliders are limited
/// to known, vetted options.
pub(crate) const SLIDER_NAME_OVERRIDES: &[(&str, &str)] = &[
    ("gamma", "Brightness"),
    ("fov", "FOV"),
    ("sensitivity", "Mouse Sensitivity"),
    ("renderDistance", "Render Distance"),
    ("simulationDistance", "Simulation Distance"),
    ("entityDistanceScaling", "Entity Distance"),
    ("guiScale", "GUI Scale"),
    ("chatScale", "Chat Scale"),
    ("chatWidth", "Chat Width"),
    ("chatOpacity", "Chat Opacity"),
    ("chatDelay", "Chat Delay"),
    ("textBackgroundOpacity", "Text Background Opacity"),
    ("masterVolume", "Master Volume"),
    ("musicVolume", "Music Volume"),
    ("weatherVolume", "Weather Volume"),
    ("blockVolume", "Blocks Volume"),
    ("ambientVolume", "Ambient Volume"),
    ("voiceVolume", "Voice Volume"),
];

/// Ordered substring → category rules. First match wins; tested against
/// both the lower-cased internal name and the resolved display name.
pub(crate) const CATEGORY_RULES: &[(&str, &str)] = &[
    ("music", "Music"),
    ("sound", "Sound"),
    ("volume", "Sound"),
    ("audio", "Sound"),
    ("render", "Video"),
    ("graphics", "Video"),
    ("fullscreen", "Video"),
    ("vsync", "Video"),
    ("particles", "Video"),
    ("gui", "Video"),
    ("fov", "Video"),
    ("gamma", "Video"),
    ("brightness", "Video"),
    ("screen", "Video"),
    ("chat", "Chat"),
    ("narrator", "Accessibility"),
    ("accessibility", "Accessibility"),
    ("contrast", "Accessibility"),
    ("subtitle", "Accessibility"),
    ("touch", "Controls"),
    ("auto", "Controls"),
    ("key", "Controls"),
    ("mouse", "Controls"),
    ("sensitivity", "Controls"),
    ("invert", "Controls"),
    ("server", "Multiplayer"),
    ("realms", "Multiplayer"),
    ("telemetry", "Privacy"),
    ("snooper", "Privacy"),
];

/// Curated `(min, max, step)` ranges for sliders whose handles don't embed
/// their own range.
pub(crate) const SLIDER_RANGES: &[(&str, (f64, f64, f64))] = &[
    ("gamma", (0.0, 5.0, 0.1)),
    ("fov", (30.0, 110.0, 1.0)),
    ("sensitivity", (0.0, 1.0, 0.01)),
    ("renderDistance", (2.0, 32.0, 1.0)),
    ("simulationDistance", (5.0, 32.0, 1.0)),
    ("entityDistanceScaling", (0.5, 5.0, 0.25)),
    ("guiScale", (0.0, 4.0, 1.0)),
    ("chatScale", (0.0, 1.0, 0.01)),
    ("chatWidth", (0.0, 1.0, 0.01)),
    ("chatOpacity", (0.0, 1.0, 0.01)),
    ("chatDelay", (0.0, 6.0, 0.1)),
    ("textBackgroundOpacity", (0.0, 1.0, 0.01)),
    ("masterVolume", (0.0, 1.0, 0.05)),
    ("musicVolume", (0.0, 1.0, 0.05)),
    ("weatherVolume", (0.0, 1.0, 0.05)),
    ("blockVolume", (0.0, 1.0, 0.05)),
    ("ambientVolume", (0.0, 1.0, 0.05)),
    ("voiceVolume", (0.0, 1.0, 0.05)),
];

pub(crate) fn toggle_name_override(name: &str) -> Option<&'static str> {
    DISPLAY_NAME_OVERRIDES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, display)| *display)
}

pub(crate) fn slider_name_override(name: &str) -> Option<&'static str> {
    SLIDER_NAME_OVERRIDES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, display)| *display)
}

pub(crate) fn curated_range(name: &str) -> Option<(f64, f64, f64)> {
    SLIDER_RANGES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, range)| *range)
}
