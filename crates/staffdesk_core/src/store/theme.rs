//! Theme preference store and OS dark-preference signal plumbing.
//!
//! # Responsibility
//! - Persist the tri-state theme mode and derive the concrete theme.
//! - React to OS dark-preference changes while in `system` mode.
//! - Apply the resolved theme to the presentation indicator.
//!
//! # Invariants
//! - `resolved` is a pure function of (`mode`, current OS preference) and is
//!   recomputed synchronously whenever either input changes.
//! - Exactly one signal listener is registered, at construction; it acts
//!   only while `mode == System`.

use crate::model::theme::{ResolvedTheme, ThemeMode};
use crate::storage::kv::{JsonStore, KeyValueStorage};
use crate::storage::StorageResult;
use log::info;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Storage key for the selected theme mode.
pub const THEME_MODE_KEY: &str = "theme_mode";

/// Change listener invoked with the new OS dark preference.
pub type ThemeChangeListener = Rc<dyn Fn(bool)>;

/// Opaque token for a registered signal listener. No unsubscription is
/// needed at process scope; the token only witnesses the registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Queryable OS dark-preference signal with change notifications.
///
/// Injected capability so the host platform hook and a deterministic test
/// double share one contract.
pub trait SystemThemeSignal {
    /// Current "does the OS prefer dark mode" value.
    fn prefers_dark(&self) -> bool;

    /// Registers a change listener, returning its handle.
    fn on_change(&self, listener: ThemeChangeListener) -> SubscriptionHandle;
}

/// Host-fed implementation of [`SystemThemeSignal`].
///
/// The embedding layer owns the real platform hook (media query, platform
/// brightness callback) and pushes changes in through `set_prefers_dark`.
/// Tests drive it the same way.
pub struct HostThemeSignal {
    prefers_dark: Cell<bool>,
    listeners: RefCell<Vec<ThemeChangeListener>>,
    next_handle: Cell<u64>,
}

impl HostThemeSignal {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            prefers_dark: Cell::new(prefers_dark),
            listeners: RefCell::new(Vec::new()),
            next_handle: Cell::new(0),
        }
    }

    /// Records a new OS preference and notifies listeners.
    ///
    /// Unchanged values do not fire; the platform hook only reports edges.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        if self.prefers_dark.get() == prefers_dark {
            return;
        }
        self.prefers_dark.set(prefers_dark);

        // Snapshot first so a listener registering another listener does not
        // observe a borrowed registry.
        let listeners: Vec<ThemeChangeListener> =
            self.listeners.borrow().iter().map(Rc::clone).collect();
        for listener in listeners {
            listener(prefers_dark);
        }
    }
}

impl SystemThemeSignal for HostThemeSignal {
    fn prefers_dark(&self) -> bool {
        self.prefers_dark.get()
    }

    fn on_change(&self, listener: ThemeChangeListener) -> SubscriptionHandle {
        self.listeners.borrow_mut().push(listener);
        let handle = SubscriptionHandle(self.next_handle.get());
        self.next_handle.set(handle.0 + 1);
        handle
    }
}

/// Boolean presentation indicator consumed by the rendering layer.
///
/// The store's "apply" contract ends at setting this flag correctly; how it
/// is rendered is out of scope.
#[derive(Debug, Clone, Default)]
pub struct DarkModeIndicator {
    dark: Rc<Cell<bool>>,
}

impl DarkModeIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dark(&self) -> bool {
        self.dark.get()
    }

    fn set(&self, dark: bool) {
        self.dark.set(dark);
    }
}

// Reactive part of the store, shared with the signal listener.
struct ThemeState {
    mode: ThemeMode,
    resolved: ResolvedTheme,
    indicator: DarkModeIndicator,
}

impl ThemeState {
    fn recompute(&mut self, os_prefers_dark: bool) {
        self.resolved = self.mode.resolve(os_prefers_dark);
        self.indicator.set(self.resolved.is_dark());
    }
}

/// Long-lived theme preference store.
pub struct ThemePreferenceStore<S: KeyValueStorage> {
    kv: JsonStore<S>,
    state: Rc<RefCell<ThemeState>>,
    signal: Rc<dyn SystemThemeSignal>,
    _subscription: SubscriptionHandle,
}

impl<S: KeyValueStorage> ThemePreferenceStore<S> {
    /// Constructs the store: hydrates the mode, resolves the initial theme,
    /// applies it to the indicator and registers the single signal listener.
    ///
    /// A stored value outside the three valid modes is cleared by the
    /// adapter and hydrates as the default (`System`).
    pub fn open(
        storage: S,
        signal: Rc<dyn SystemThemeSignal>,
        indicator: DarkModeIndicator,
    ) -> StorageResult<Self> {
        let kv = JsonStore::new(storage);
        let mode = kv.read::<ThemeMode>(THEME_MODE_KEY)?.unwrap_or_default();

        let mut initial = ThemeState {
            mode,
            resolved: ResolvedTheme::Light,
            indicator,
        };
        initial.recompute(signal.prefers_dark());
        info!(
            "event=theme_hydrate module=theme status=ok mode={} resolved={}",
            initial.mode.as_str(),
            initial.resolved.as_str()
        );

        let state = Rc::new(RefCell::new(initial));
        let listener_state = Rc::clone(&state);
        let subscription = signal.on_change(Rc::new(move |prefers_dark| {
            let mut state = listener_state.borrow_mut();
            if state.mode == ThemeMode::System {
                state.recompute(prefers_dark);
            }
        }));

        Ok(Self {
            kv,
            state,
            signal,
            _subscription: subscription,
        })
    }

    pub fn mode(&self) -> ThemeMode {
        self.state.borrow().mode
    }

    pub fn resolved(&self) -> ResolvedTheme {
        self.state.borrow().resolved
    }

    pub fn is_dark(&self) -> bool {
        self.state.borrow().resolved.is_dark()
    }

    /// Selects a new mode, persists it and synchronously recomputes and
    /// applies the resolved theme.
    ///
    /// Invalid modes are unrepresentable in [`ThemeMode`]; string input from
    /// untyped boundaries must go through [`ThemeMode::parse`] first and
    /// fail loudly there.
    pub fn set_mode(&self, mode: ThemeMode) -> StorageResult<()> {
        let mut state = self.state.borrow_mut();
        state.mode = mode;
        self.kv.write(THEME_MODE_KEY, &mode)?;
        state.recompute(self.signal.prefers_dark());
        info!(
            "event=theme_set module=theme status=ok mode={} resolved={}",
            mode.as_str(),
            state.resolved.as_str()
        );

        Ok(())
    }
}
