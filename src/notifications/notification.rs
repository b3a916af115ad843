// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Toast` entry, the `Variant` enum, and the
//! `ToastOptions` / `ToastPatch` builders used to create and amend entries.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Unique identifier for a toast.
///
/// Identifiers grow monotonically and are never reused while the process lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique toast ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Semantic category of a toast; selects the default icon and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// Neutral message.
    #[default]
    Default,
    /// Operation completed successfully.
    Success,
    /// Informational message.
    Info,
    /// Something needs attention but nothing failed.
    Warning,
    /// A request or operation failed.
    Destructive,
}

impl Variant {
    /// All variants, in declaration order.
    pub const ALL: [Variant; 5] = [
        Variant::Default,
        Variant::Success,
        Variant::Info,
        Variant::Warning,
        Variant::Destructive,
    ];

    /// Returns the icon shown when the caller does not choose one.
    #[must_use]
    pub fn default_icon(self) -> Icon {
        match self {
            Variant::Default => Icon::Neutral,
            Variant::Success => Icon::CheckCircle,
            Variant::Info => Icon::Info,
            Variant::Warning => Icon::AlertTriangle,
            Variant::Destructive => Icon::XCircle,
        }
    }

    /// Returns the lowercase name used for styling hooks and parsing.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Default => "default",
            Variant::Success => "success",
            Variant::Info => "info",
            Variant::Warning => "warning",
            Variant::Destructive => "destructive",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown toast variant: {s}"))
    }
}

/// Icon hint for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Neutral,
    CheckCircle,
    Info,
    AlertTriangle,
    XCircle,
}

/// How long a toast stays visible before it is dismissed automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Auto-dismiss once the duration has elapsed.
    Timed(Duration),
    /// Only dismissed on explicit request.
    Infinite,
}

impl Lifetime {
    /// Returns the auto-dismiss delay, or `None` for infinite toasts.
    #[must_use]
    pub fn duration(self) -> Option<Duration> {
        match self {
            Lifetime::Timed(duration) => Some(duration),
            Lifetime::Infinite => None,
        }
    }
}

/// Opaque control attached to a toast, such as a retry button.
///
/// The queue stores it and hands it back to the renderer untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub label: String,
    /// Accessible description of what the action does.
    pub alt_text: String,
}

impl Action {
    pub fn new(label: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            alt_text: alt_text.into(),
        }
    }
}

/// Options for a new toast.
///
/// Every field is optional; unset fields take the queue defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastOptions {
    pub title: Option<String>,
    pub description: Option<String>,
    pub variant: Variant,
    pub icon: Option<Icon>,
    /// `None` uses the queue's default duration.
    pub lifetime: Option<Lifetime>,
    pub action: Option<Action>,
    pub disable_progress: bool,
}

impl ToastOptions {
    /// Creates empty options (default variant, default duration).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a success toast with the given title.
    pub fn success(title: impl Into<String>) -> Self {
        Self::new().variant(Variant::Success).title(title)
    }

    /// Creates an info toast with the given title.
    pub fn info(title: impl Into<String>) -> Self {
        Self::new().variant(Variant::Info).title(title)
    }

    /// Creates a warning toast with the given title.
    pub fn warning(title: impl Into<String>) -> Self {
        Self::new().variant(Variant::Warning).title(title)
    }

    /// Creates a destructive toast with the given title.
    pub fn destructive(title: impl Into<String>) -> Self {
        Self::new().variant(Variant::Destructive).title(title)
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Overrides the icon derived from the variant.
    #[must_use]
    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Sets a custom auto-dismiss duration, overriding the queue default.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.lifetime = Some(Lifetime::Timed(duration));
        self
    }

    /// Keeps the toast on screen until it is dismissed explicitly.
    #[must_use]
    pub fn persistent(mut self) -> Self {
        self.lifetime = Some(Lifetime::Infinite);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Hides the countdown progress indicator.
    #[must_use]
    pub fn without_progress(mut self) -> Self {
        self.disable_progress = true;
        self
    }
}

/// Fields to merge into an existing toast. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub variant: Option<Variant>,
    pub icon: Option<Icon>,
    pub lifetime: Option<Lifetime>,
    pub action: Option<Action>,
    pub disable_progress: Option<bool>,
}

impl ToastPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    #[must_use]
    pub fn lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn disable_progress(mut self, disable: bool) -> Self {
        self.disable_progress = Some(disable);
        self
    }
}

/// A toast tracked by the queue.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    id: ToastId,
    title: Option<String>,
    description: Option<String>,
    variant: Variant,
    icon: Icon,
    lifetime: Lifetime,
    visible: bool,
    action: Option<Action>,
    show_progress: bool,
    created_at: Instant,
}

impl Toast {
    /// Builds a visible toast from caller options.
    pub(crate) fn from_options(options: ToastOptions, default_duration: Duration) -> Self {
        Self {
            id: ToastId::new(),
            title: options.title,
            description: options.description,
            variant: options.variant,
            icon: options
                .icon
                .unwrap_or_else(|| options.variant.default_icon()),
            lifetime: options
                .lifetime
                .unwrap_or(Lifetime::Timed(default_duration)),
            visible: true,
            action: options.action,
            show_progress: !options.disable_progress,
            created_at: Instant::now(),
        }
    }

    /// Merges a patch into this toast. The icon is not re-derived from a
    /// new variant; pass an icon explicitly to change it.
    pub(crate) fn apply(&mut self, patch: ToastPatch) {
        if let Some(title) = patch.title {
            self.title = Some(title);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(variant) = patch.variant {
            self.variant = variant;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(lifetime) = patch.lifetime {
            self.lifetime = lifetime;
        }
        if let Some(action) = patch.action {
            self.action = Some(action);
        }
        if let Some(disable) = patch.disable_progress {
            self.show_progress = !disable;
        }
    }

    pub(crate) fn hide(&mut self) {
        self.visible = false;
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn icon(&self) -> Icon {
        self.icon
    }

    #[must_use]
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// Returns false once dismissal has begun.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.show_progress
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Returns the age of this toast.
    #[must_use]
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }
}
