// Preference store for the editor and preview panes
// Persisted to key-value storage on every mutation

use serde::{Deserialize, Serialize};

use crate::events::{Listener, PrefEvent};
use crate::platform::{OsKind, PlatformQuery};
use crate::storage::Storage;

/// Editor word wrap. Two-valued, matches the editor widget's own setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordWrap {
    #[default]
    On,
    Off,
}

impl WordWrap {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordWrap::On => "on",
            WordWrap::Off => "off",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "on" => Some(WordWrap::On),
            "off" => Some(WordWrap::Off),
            _ => None,
        }
    }

    fn toggled(self) -> Self {
        match self {
            WordWrap::On => WordWrap::Off,
            WordWrap::Off => WordWrap::On,
        }
    }
}

/// Line number gutter visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineNumbers {
    #[default]
    On,
    Off,
}

impl LineNumbers {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineNumbers::On => "on",
            LineNumbers::Off => "off",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "on" => Some(LineNumbers::On),
            "off" => Some(LineNumbers::Off),
            _ => None,
        }
    }

    fn toggled(self) -> Self {
        match self {
            LineNumbers::On => LineNumbers::Off,
            LineNumbers::Off => LineNumbers::On,
        }
    }
}

/// Current-line highlighting in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineHighlight {
    #[default]
    None,
    Line,
}

impl LineHighlight {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineHighlight::None => "none",
            LineHighlight::Line => "line",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(LineHighlight::None),
            "line" => Some(LineHighlight::Line),
            _ => None,
        }
    }

    fn toggled(self) -> Self {
        match self {
            LineHighlight::None => LineHighlight::Line,
            LineHighlight::Line => LineHighlight::None,
        }
    }
}

/// The five fields zen mode overrides, captured on entry for restoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZenSnapshot {
    pub render_line_highlight: LineHighlight,
    pub show_tabs: bool,
    pub status_bar: bool,
    pub minimap: bool,
    pub line_numbers: LineNumbers,
}

/// Font size bounds per slot.
const EDITOR_SIZE_RANGE: (u32, u32) = (10, 24);
const PREVIEW_SIZE_RANGE: (u32, u32) = (12, 28);
const CODE_SIZE_RANGE: (u32, u32) = (10, 24);

const DEFAULT_EDITOR_SIZE: u32 = 14;
const DEFAULT_PREVIEW_SIZE: u32 = 16;
const DEFAULT_CODE_SIZE: u32 = 14;

/// The full preference set. Read directly by UI consumers; mutated only
/// through [`PrefStore`] methods so every change is published and persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Preferences {
    #[serde(rename = "editor.minimap")]
    pub minimap: bool,

    #[serde(rename = "editor.wordWrap")]
    pub word_wrap: WordWrap,

    #[serde(rename = "editor.lineNumbers")]
    pub line_numbers: LineNumbers,

    #[serde(rename = "editor.vimMode")]
    pub vim_mode: bool,

    #[serde(rename = "editor.statusBar")]
    pub status_bar: bool,

    #[serde(rename = "editor.wordCount")]
    pub word_count: bool,

    #[serde(rename = "editor.renderLineHighlight")]
    pub line_highlight: LineHighlight,

    #[serde(rename = "editor.showTabs")]
    pub show_tabs: bool,

    #[serde(rename = "editor.zenMode")]
    pub zen_mode: bool,

    #[serde(rename = "editor.preZenState", skip_serializing_if = "Option::is_none")]
    pub pre_zen: Option<ZenSnapshot>,

    #[serde(rename = "editor.occurrencesHighlight")]
    pub occurrences_highlight: bool,

    pub os: OsKind,

    #[serde(rename = "editor.font")]
    pub editor_font: String,

    #[serde(rename = "editor.fontSize")]
    pub editor_font_size: u32,

    #[serde(rename = "preview.font")]
    pub preview_font: String,

    #[serde(rename = "preview.fontSize")]
    pub preview_font_size: u32,

    #[serde(rename = "preview.codeFont")]
    pub code_font: String,

    #[serde(rename = "preview.codeFontSize")]
    pub code_font_size: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        let fonts = OsKind::Unknown.font_defaults();
        Self {
            minimap: false,
            word_wrap: WordWrap::On,
            line_numbers: LineNumbers::On,
            vim_mode: false,
            status_bar: true,
            word_count: false,
            line_highlight: LineHighlight::None,
            show_tabs: true,
            zen_mode: false,
            pre_zen: None,
            occurrences_highlight: false,
            os: OsKind::Unknown,
            editor_font: fonts.editor.to_string(),
            editor_font_size: DEFAULT_EDITOR_SIZE,
            preview_font: fonts.preview.to_string(),
            preview_font_size: DEFAULT_PREVIEW_SIZE,
            code_font: fonts.code.to_string(),
            code_font_size: DEFAULT_CODE_SIZE,
        }
    }
}

/// Which font families hold an explicit (persisted or user-set) choice.
/// Platform resolution fills only the slots that don't.
#[derive(Debug, Clone, Copy, Default)]
struct FontChoices {
    editor: bool,
    preview: bool,
    code: bool,
}

/// Preference store: loads persisted values at construction, publishes a
/// change event and rewrites the full key set on every mutation. One
/// instance per process, owned by the composition root.
pub struct PrefStore<S: Storage> {
    prefs: Preferences,
    storage: S,
    listeners: Vec<Listener>,
    chosen: FontChoices,
}

fn parse_bool(value: &str) -> bool {
    value == "true"
}

fn parse_size(value: Option<String>, range: (u32, u32), default: u32) -> u32 {
    let size = match value {
        Some(s) => s.trim().parse::<u32>().unwrap_or(default),
        None => default,
    };
    size.clamp(range.0, range.1)
}

impl<S: Storage> PrefStore<S> {
    /// Construct from storage. Missing keys keep built-in defaults;
    /// malformed values fall back per field. Never fails.
    pub fn load(storage: S) -> Self {
        let mut prefs = Preferences::default();
        let mut chosen = FontChoices::default();

        if let Some(v) = storage.get("editor.minimap") {
            prefs.minimap = parse_bool(&v);
        }
        if let Some(v) = storage.get("editor.wordWrap") {
            if let Some(w) = WordWrap::parse(&v) {
                prefs.word_wrap = w;
            }
        }
        if let Some(v) = storage.get("editor.lineNumbers") {
            if let Some(l) = LineNumbers::parse(&v) {
                prefs.line_numbers = l;
            }
        }
        if let Some(v) = storage.get("editor.vimMode") {
            prefs.vim_mode = parse_bool(&v);
        }
        if let Some(v) = storage.get("editor.statusBar") {
            prefs.status_bar = parse_bool(&v);
        }
        if let Some(v) = storage.get("editor.wordCount") {
            prefs.word_count = parse_bool(&v);
        }
        if let Some(v) = storage.get("editor.renderLineHighlight") {
            if let Some(h) = LineHighlight::parse(&v) {
                prefs.line_highlight = h;
            }
        }
        if let Some(v) = storage.get("editor.showTabs") {
            prefs.show_tabs = parse_bool(&v);
        }
        if let Some(v) = storage.get("editor.zenMode") {
            prefs.zen_mode = parse_bool(&v);
        }
        if let Some(v) = storage.get("editor.occurrencesHighlight") {
            prefs.occurrences_highlight = parse_bool(&v);
        }

        // Corrupt snapshot is discarded, not fatal: exiting zen then
        // restores nothing.
        if let Some(v) = storage.get("editor.preZenState") {
            match serde_json::from_str::<ZenSnapshot>(&v) {
                Ok(snapshot) => prefs.pre_zen = Some(snapshot),
                Err(e) => log::warn!("discarding corrupt pre-zen snapshot: {}", e),
            }
        }

        if let Some(v) = storage.get("editor.font") {
            prefs.editor_font = v;
            chosen.editor = true;
        }
        if let Some(v) = storage.get("preview.font") {
            prefs.preview_font = v;
            chosen.preview = true;
        }
        if let Some(v) = storage.get("preview.codeFont") {
            prefs.code_font = v;
            chosen.code = true;
        }
        prefs.editor_font_size = parse_size(
            storage.get("editor.fontSize"),
            EDITOR_SIZE_RANGE,
            DEFAULT_EDITOR_SIZE,
        );
        prefs.preview_font_size = parse_size(
            storage.get("preview.fontSize"),
            PREVIEW_SIZE_RANGE,
            DEFAULT_PREVIEW_SIZE,
        );
        prefs.code_font_size = parse_size(
            storage.get("preview.codeFontSize"),
            CODE_SIZE_RANGE,
            DEFAULT_CODE_SIZE,
        );

        Self {
            prefs,
            storage,
            listeners: Vec::new(),
            chosen,
        }
    }

    /// Current preference values.
    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    /// Register a change listener. Called once per mutation, before the
    /// write-through.
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    /// Apply the resolved OS identity: font slots without an explicit
    /// family pick up the OS defaults. Called by the composition root once
    /// the host platform query answers; a failed query maps to Unknown.
    pub fn resolve_platform(&mut self, query: &dyn PlatformQuery) {
        let os = match query.os_kind() {
            Ok(kind) => kind,
            Err(e) => {
                log::debug!("platform query failed, using unknown defaults: {}", e);
                OsKind::Unknown
            }
        };
        self.prefs.os = os;

        let fonts = os.font_defaults();
        if !self.chosen.editor {
            self.prefs.editor_font = fonts.editor.to_string();
        }
        if !self.chosen.preview {
            self.prefs.preview_font = fonts.preview.to_string();
        }
        if !self.chosen.code {
            self.prefs.code_font = fonts.code.to_string();
        }
        self.changed(PrefEvent::PlatformResolved(os));
    }

    pub fn toggle_minimap(&mut self) {
        self.prefs.minimap = !self.prefs.minimap;
        self.changed(PrefEvent::Minimap(self.prefs.minimap));
    }

    pub fn toggle_word_wrap(&mut self) {
        self.prefs.word_wrap = self.prefs.word_wrap.toggled();
        self.changed(PrefEvent::WordWrap);
    }

    pub fn toggle_line_numbers(&mut self) {
        self.prefs.line_numbers = self.prefs.line_numbers.toggled();
        self.changed(PrefEvent::LineNumbers);
    }

    pub fn toggle_vim_mode(&mut self) {
        self.prefs.vim_mode = !self.prefs.vim_mode;
        self.changed(PrefEvent::VimMode(self.prefs.vim_mode));
    }

    pub fn toggle_status_bar(&mut self) {
        self.prefs.status_bar = !self.prefs.status_bar;
        self.changed(PrefEvent::StatusBar(self.prefs.status_bar));
    }

    pub fn toggle_word_count(&mut self) {
        self.prefs.word_count = !self.prefs.word_count;
        self.changed(PrefEvent::WordCount(self.prefs.word_count));
    }

    pub fn toggle_line_highlight(&mut self) {
        self.prefs.line_highlight = self.prefs.line_highlight.toggled();
        self.changed(PrefEvent::LineHighlight);
    }

    pub fn toggle_tabs(&mut self) {
        self.prefs.show_tabs = !self.prefs.show_tabs;
        self.changed(PrefEvent::ShowTabs(self.prefs.show_tabs));
    }

    pub fn toggle_occurrences_highlight(&mut self) {
        self.prefs.occurrences_highlight = !self.prefs.occurrences_highlight;
        self.changed(PrefEvent::OccurrencesHighlight(
            self.prefs.occurrences_highlight,
        ));
    }

    /// Zen mode suppresses chrome (line highlight, tabs, status bar,
    /// minimap, line numbers) and remembers the prior values. Exiting
    /// restores them; with no snapshot (corrupted or missing) the fields
    /// stay as they are.
    pub fn toggle_zen_mode(&mut self) {
        if !self.prefs.zen_mode {
            self.prefs.pre_zen = Some(ZenSnapshot {
                render_line_highlight: self.prefs.line_highlight,
                show_tabs: self.prefs.show_tabs,
                status_bar: self.prefs.status_bar,
                minimap: self.prefs.minimap,
                line_numbers: self.prefs.line_numbers,
            });
            self.prefs.line_highlight = LineHighlight::None;
            self.prefs.show_tabs = false;
            self.prefs.status_bar = false;
            self.prefs.minimap = false;
            self.prefs.line_numbers = LineNumbers::Off;
            self.prefs.zen_mode = true;
        } else {
            self.prefs.zen_mode = false;
            if let Some(snapshot) = self.prefs.pre_zen.take() {
                self.prefs.line_highlight = snapshot.render_line_highlight;
                self.prefs.show_tabs = snapshot.show_tabs;
                self.prefs.status_bar = snapshot.status_bar;
                self.prefs.minimap = snapshot.minimap;
                self.prefs.line_numbers = snapshot.line_numbers;
            }
        }
        self.changed(PrefEvent::ZenMode(self.prefs.zen_mode));
    }

    pub fn set_editor_font(&mut self, family: impl Into<String>) {
        self.prefs.editor_font = family.into();
        self.chosen.editor = true;
        self.changed(PrefEvent::Fonts);
    }

    pub fn set_preview_font(&mut self, family: impl Into<String>) {
        self.prefs.preview_font = family.into();
        self.chosen.preview = true;
        self.changed(PrefEvent::Fonts);
    }

    pub fn set_code_font(&mut self, family: impl Into<String>) {
        self.prefs.code_font = family.into();
        self.chosen.code = true;
        self.changed(PrefEvent::Fonts);
    }

    pub fn set_editor_font_size(&mut self, size: u32) {
        self.prefs.editor_font_size = size.clamp(EDITOR_SIZE_RANGE.0, EDITOR_SIZE_RANGE.1);
        self.changed(PrefEvent::Fonts);
    }

    pub fn set_preview_font_size(&mut self, size: u32) {
        self.prefs.preview_font_size = size.clamp(PREVIEW_SIZE_RANGE.0, PREVIEW_SIZE_RANGE.1);
        self.changed(PrefEvent::Fonts);
    }

    pub fn set_code_font_size(&mut self, size: u32) {
        self.prefs.code_font_size = size.clamp(CODE_SIZE_RANGE.0, CODE_SIZE_RANGE.1);
        self.changed(PrefEvent::Fonts);
    }

    /// Reset the editor font to the OS default family at the default size.
    pub fn reset_editor_font(&mut self) {
        let fonts = self.prefs.os.font_defaults();
        self.prefs.editor_font = fonts.editor.to_string();
        self.prefs.editor_font_size = DEFAULT_EDITOR_SIZE;
        self.chosen.editor = false;
        self.changed(PrefEvent::Fonts);
    }

    /// Reset the preview and code fonts to OS defaults at default sizes.
    pub fn reset_preview_font(&mut self) {
        let fonts = self.prefs.os.font_defaults();
        self.prefs.preview_font = fonts.preview.to_string();
        self.prefs.preview_font_size = DEFAULT_PREVIEW_SIZE;
        self.prefs.code_font = fonts.code.to_string();
        self.prefs.code_font_size = DEFAULT_CODE_SIZE;
        self.chosen.preview = false;
        self.chosen.code = false;
        self.changed(PrefEvent::Fonts);
    }

    /// Publish `event` to listeners, then rewrite the full key set.
    fn changed(&mut self, event: PrefEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
        self.persist();
    }

    /// Fire-and-forget write-through. Failure is logged, never surfaced.
    fn persist(&mut self) {
        let p = &self.prefs;
        let mut entries: Vec<(&str, String)> = vec![
            ("editor.minimap", p.minimap.to_string()),
            ("editor.wordWrap", p.word_wrap.as_str().to_string()),
            ("editor.lineNumbers", p.line_numbers.as_str().to_string()),
            ("editor.vimMode", p.vim_mode.to_string()),
            ("editor.statusBar", p.status_bar.to_string()),
            ("editor.wordCount", p.word_count.to_string()),
            (
                "editor.renderLineHighlight",
                p.line_highlight.as_str().to_string(),
            ),
            ("editor.showTabs", p.show_tabs.to_string()),
            ("editor.zenMode", p.zen_mode.to_string()),
            (
                "editor.occurrencesHighlight",
                p.occurrences_highlight.to_string(),
            ),
            ("editor.font", p.editor_font.clone()),
            ("editor.fontSize", p.editor_font_size.to_string()),
            ("preview.font", p.preview_font.clone()),
            ("preview.fontSize", p.preview_font_size.to_string()),
            ("preview.codeFont", p.code_font.clone()),
            ("preview.codeFontSize", p.code_font_size.to_string()),
        ];
        if let Some(snapshot) = &p.pre_zen {
            match serde_json::to_string(snapshot) {
                Ok(json) => entries.push(("editor.preZenState", json)),
                Err(e) => log::warn!("failed to serialize pre-zen snapshot: {}", e),
            }
        }

        if let Err(e) = self.storage.put_all(&entries) {
            log::warn!("failed to persist preferences: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    struct FakePlatform(Result<OsKind, String>);

    impl PlatformQuery for FakePlatform {
        fn os_kind(&self) -> Result<OsKind, String> {
            self.0.clone()
        }
    }

    fn fresh() -> PrefStore<MemoryStorage> {
        PrefStore::load(MemoryStorage::new())
    }

    #[test]
    fn test_defaults() {
        let store = fresh();
        let p = store.prefs();
        assert!(!p.minimap);
        assert_eq!(p.word_wrap, WordWrap::On);
        assert_eq!(p.line_numbers, LineNumbers::On);
        assert!(!p.vim_mode);
        assert!(p.status_bar);
        assert!(!p.word_count);
        assert_eq!(p.line_highlight, LineHighlight::None);
        assert!(p.show_tabs);
        assert!(!p.zen_mode);
        assert!(p.pre_zen.is_none());
        assert!(!p.occurrences_highlight);
        assert_eq!(p.editor_font_size, 14);
        assert_eq!(p.preview_font_size, 16);
        assert_eq!(p.code_font_size, 14);
    }

    #[test]
    fn test_boolean_toggles_are_involutions() {
        let mut store = fresh();
        let before = store.prefs().clone();

        store.toggle_minimap();
        store.toggle_minimap();
        store.toggle_vim_mode();
        store.toggle_vim_mode();
        store.toggle_status_bar();
        store.toggle_status_bar();
        store.toggle_word_count();
        store.toggle_word_count();
        store.toggle_tabs();
        store.toggle_tabs();
        store.toggle_occurrences_highlight();
        store.toggle_occurrences_highlight();

        let after = store.prefs();
        assert_eq!(after.minimap, before.minimap);
        assert_eq!(after.vim_mode, before.vim_mode);
        assert_eq!(after.status_bar, before.status_bar);
        assert_eq!(after.word_count, before.word_count);
        assert_eq!(after.show_tabs, before.show_tabs);
        assert_eq!(after.occurrences_highlight, before.occurrences_highlight);
    }

    #[test]
    fn test_two_valued_toggles_cycle() {
        let mut store = fresh();

        store.toggle_word_wrap();
        assert_eq!(store.prefs().word_wrap, WordWrap::Off);
        store.toggle_word_wrap();
        assert_eq!(store.prefs().word_wrap, WordWrap::On);

        store.toggle_line_numbers();
        assert_eq!(store.prefs().line_numbers, LineNumbers::Off);
        store.toggle_line_numbers();
        assert_eq!(store.prefs().line_numbers, LineNumbers::On);

        store.toggle_line_highlight();
        assert_eq!(store.prefs().line_highlight, LineHighlight::Line);
        store.toggle_line_highlight();
        assert_eq!(store.prefs().line_highlight, LineHighlight::None);
    }

    #[test]
    fn test_zen_mode_captures_and_forces() {
        let mut store = fresh();
        // Non-default starting values so the restore is observable.
        store.toggle_minimap(); // true
        store.toggle_line_highlight(); // Line
        store.toggle_line_numbers(); // Off

        store.toggle_zen_mode();
        let p = store.prefs();
        assert!(p.zen_mode);
        assert_eq!(p.line_highlight, LineHighlight::None);
        assert!(!p.show_tabs);
        assert!(!p.status_bar);
        assert!(!p.minimap);
        assert_eq!(p.line_numbers, LineNumbers::Off);

        let snapshot = p.pre_zen.expect("snapshot captured on entry");
        assert_eq!(snapshot.render_line_highlight, LineHighlight::Line);
        assert!(snapshot.show_tabs);
        assert!(snapshot.status_bar);
        assert!(snapshot.minimap);
        assert_eq!(snapshot.line_numbers, LineNumbers::Off);
    }

    #[test]
    fn test_zen_mode_restores_on_exit() {
        let mut store = fresh();
        store.toggle_minimap();
        store.toggle_line_highlight();
        store.toggle_status_bar(); // false

        store.toggle_zen_mode();
        store.toggle_zen_mode();

        let p = store.prefs();
        assert!(!p.zen_mode);
        assert!(p.pre_zen.is_none());
        assert!(p.minimap);
        assert_eq!(p.line_highlight, LineHighlight::Line);
        assert!(!p.status_bar);
        assert!(p.show_tabs);
        assert_eq!(p.line_numbers, LineNumbers::On);
    }

    #[test]
    fn test_zen_exit_without_snapshot_leaves_fields() {
        // Persisted state says zen is on, but the snapshot is invalid JSON.
        let storage = MemoryStorage::with_entries(&[
            ("editor.zenMode", "true"),
            ("editor.preZenState", "{not json"),
        ]);
        let mut store = PrefStore::load(storage);
        assert!(store.prefs().zen_mode);
        assert!(store.prefs().pre_zen.is_none());

        store.toggle_zen_mode();
        let p = store.prefs();
        assert!(!p.zen_mode);
        // No restoration source: the zen-forced defaults stay put.
        assert_eq!(p.line_highlight, LineHighlight::None);
        assert!(p.show_tabs);
        assert!(p.status_bar);
        assert!(!p.minimap);
        assert_eq!(p.line_numbers, LineNumbers::On);
    }

    #[test]
    fn test_load_booleans() {
        let store = PrefStore::load(MemoryStorage::with_entries(&[(
            "editor.vimMode",
            "true",
        )]));
        assert!(store.prefs().vim_mode);

        let store = PrefStore::load(MemoryStorage::new());
        assert!(!store.prefs().vim_mode);

        // Anything other than the literal "true" is false.
        let store = PrefStore::load(MemoryStorage::with_entries(&[(
            "editor.vimMode",
            "TRUE",
        )]));
        assert!(!store.prefs().vim_mode);
    }

    #[test]
    fn test_load_enums() {
        let store = PrefStore::load(MemoryStorage::with_entries(&[
            ("editor.wordWrap", "off"),
            ("editor.lineNumbers", "off"),
            ("editor.renderLineHighlight", "line"),
        ]));
        let p = store.prefs();
        assert_eq!(p.word_wrap, WordWrap::Off);
        assert_eq!(p.line_numbers, LineNumbers::Off);
        assert_eq!(p.line_highlight, LineHighlight::Line);

        // Unrecognized value keeps the default.
        let store = PrefStore::load(MemoryStorage::with_entries(&[(
            "editor.wordWrap",
            "wordWrapColumn",
        )]));
        assert_eq!(store.prefs().word_wrap, WordWrap::On);
    }

    #[test]
    fn test_font_sizes_clamped_on_load() {
        let store = PrefStore::load(MemoryStorage::with_entries(&[
            ("editor.fontSize", "99"),
            ("preview.fontSize", "1"),
            ("preview.codeFontSize", "not a number"),
        ]));
        let p = store.prefs();
        assert_eq!(p.editor_font_size, 24);
        assert_eq!(p.preview_font_size, 12);
        assert_eq!(p.code_font_size, 14);
    }

    #[test]
    fn test_font_sizes_clamped_on_set() {
        let mut store = fresh();
        store.set_editor_font_size(8);
        assert_eq!(store.prefs().editor_font_size, 10);
        store.set_preview_font_size(100);
        assert_eq!(store.prefs().preview_font_size, 28);
        store.set_code_font_size(18);
        assert_eq!(store.prefs().code_font_size, 18);
    }

    #[test]
    fn test_platform_resolution_fills_unset_fonts() {
        let mut store = fresh();
        store.resolve_platform(&FakePlatform(Ok(OsKind::MacOs)));
        let p = store.prefs();
        assert_eq!(p.os, OsKind::MacOs);
        assert_eq!(p.editor_font, "SF Pro Text");
        assert_eq!(p.code_font, "Menlo");
    }

    #[test]
    fn test_persisted_fonts_beat_platform_defaults() {
        let storage =
            MemoryStorage::with_entries(&[("editor.font", "Iosevka"), ("preview.font", "Georgia")]);
        let mut store = PrefStore::load(storage);
        store.resolve_platform(&FakePlatform(Ok(OsKind::MacOs)));
        let p = store.prefs();
        assert_eq!(p.editor_font, "Iosevka");
        assert_eq!(p.preview_font, "Georgia");
        // Unset slot still picks up the OS default.
        assert_eq!(p.code_font, "Menlo");
    }

    #[test]
    fn test_failed_query_maps_to_unknown() {
        let mut store = fresh();
        store.resolve_platform(&FakePlatform(Err("no host bridge".to_string())));
        assert_eq!(store.prefs().os, OsKind::Unknown);
        assert_eq!(store.prefs().editor_font, "Segoe UI");
    }

    #[test]
    fn test_resets_use_resolved_os_defaults() {
        let mut store = fresh();
        store.resolve_platform(&FakePlatform(Ok(OsKind::Linux)));
        store.set_editor_font("Iosevka");
        store.set_editor_font_size(20);
        store.set_preview_font("Georgia");
        store.set_code_font("Fira Code");

        store.reset_editor_font();
        assert_eq!(store.prefs().editor_font, "Ubuntu");
        assert_eq!(store.prefs().editor_font_size, 14);

        store.reset_preview_font();
        let p = store.prefs();
        assert_eq!(p.preview_font, "Ubuntu");
        assert_eq!(p.preview_font_size, 16);
        assert_eq!(p.code_font, "DejaVu Sans Mono");
        assert_eq!(p.code_font_size, 14);
    }

    #[test]
    fn test_every_mutation_publishes_one_event() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();

        let mut store = fresh();
        store.subscribe(Box::new(move |ev| sink.borrow_mut().push(*ev)));

        store.toggle_minimap();
        store.toggle_word_wrap();
        store.toggle_zen_mode();

        let events = seen.borrow();
        assert_eq!(
            *events,
            vec![
                PrefEvent::Minimap(true),
                PrefEvent::WordWrap,
                PrefEvent::ZenMode(true),
            ]
        );
    }

    #[test]
    fn test_zen_round_trip_through_storage() {
        let mut store = fresh();
        store.toggle_minimap();
        store.toggle_zen_mode();

        // Pull the persisted blob back out through a fresh store, the way
        // a restart would.
        let persisted = store.storage;
        let reloaded = PrefStore::load(persisted);
        let p = reloaded.prefs();
        assert!(p.zen_mode);
        let snapshot = p.pre_zen.expect("snapshot persisted while zen");
        assert!(snapshot.minimap);
        assert!(snapshot.status_bar);
    }
}
