//! Widget manager: owns every bound instance and runs the lifecycle.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use kickdom::{layout, AnimationState, Document, NodeId, TransitionConfig, TweenProperty};

use crate::classes;
use crate::environment::Environment;
use crate::error::DropkickError;
use crate::instance::{OptionEntry, PanelParts, WidgetInstance};
use crate::keyboard::{self, NavCommand};
use crate::panel;
use crate::selection;
use crate::settings::Settings;
use crate::view::{self, ViewModel};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Work postponed to the next [`Dropkick::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Deferred {
    HideControl(NodeId),
}

/// Manager for all dropdowns bound in one document.
///
/// The manager tracks:
/// - Every bound instance, keyed by its native control
/// - Registration order, used by [`reset`](Self::reset) and keyboard routing
/// - Running tweens (fade-in, scroll sync)
/// - Deferred work (hiding native controls after binding)
#[derive(Debug)]
pub struct Dropkick {
    pub(crate) instances: HashMap<NodeId, WidgetInstance>,
    pub(crate) order: Vec<NodeId>,
    pub(crate) animations: AnimationState,
    pub(crate) deferred: Vec<Deferred>,
    pub(crate) env: Environment,
}

impl Dropkick {
    /// Create a manager for `doc`.
    ///
    /// Outside legacy environments this marks the document root with
    /// `dk_fouc` so stylesheets can hide selects that are about to be bound.
    pub fn new(doc: &mut Document, env: Environment) -> Self {
        if !env.legacy {
            doc.add_class(doc.root(), classes::FOUC);
        }
        Self {
            instances: HashMap::new(),
            order: Vec::new(),
            animations: AnimationState::new(),
            deferred: Vec::new(),
            env,
        }
    }

    pub fn environment(&self) -> Environment {
        self.env
    }

    /// Make every tween finish on its first step.
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.animations.set_reduced_motion(enabled);
    }

    // -------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn is_bound(&self, control: NodeId) -> bool {
        self.instances.contains_key(&control)
    }

    pub fn instance(&self, control: NodeId) -> Option<&WidgetInstance> {
        self.instances.get(&control)
    }

    /// Instances in registration order.
    pub fn instances(&self) -> impl Iterator<Item = &WidgetInstance> {
        self.order.iter().filter_map(|c| self.instances.get(c))
    }

    /// The instance whose panel contains `node`.
    pub fn instance_for_node(&self, doc: &Document, node: NodeId) -> Option<&WidgetInstance> {
        let container = doc.closest_class(node, classes::CONTAINER)?;
        self.instances
            .values()
            .find(|i| i.parts.container == container)
    }

    /// Controls whose panel is currently open.
    pub fn open_controls(&self, doc: &Document) -> Vec<NodeId> {
        self.instances()
            .filter(|i| i.is_open(doc))
            .map(|i| i.control)
            .collect()
    }

    fn instance_mut(&mut self, control: NodeId) -> Result<&mut WidgetInstance, DropkickError> {
        self.instances
            .get_mut(&control)
            .ok_or(DropkickError::NotBound(control))
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Bind a dropdown to `control`.
    ///
    /// Binding an already-bound control changes nothing and returns the
    /// existing instance. Returns `Ok(None)` in legacy environments.
    pub fn init(
        &mut self,
        doc: &mut Document,
        control: NodeId,
        settings: Settings,
    ) -> Result<Option<&WidgetInstance>, DropkickError> {
        if self.env.legacy {
            return Ok(None);
        }
        if !doc.is_select(control) {
            return Err(DropkickError::NotASelect(control));
        }
        if self.instances.contains_key(&control) {
            log::debug!("{control} already has a dropdown");
            return Ok(self.instances.get(&control));
        }
        if !doc.is_connected(control) {
            return Err(DropkickError::Detached(control));
        }

        let id = widget_id(doc, control);
        let options: Vec<OptionEntry> = doc
            .options(control)
            .into_iter()
            .map(|o| OptionEntry::new(doc.option_value(o), doc.text(o)))
            .collect();
        let original = doc.selected_index(control);
        let selected = original.and_then(|i| options.get(i));
        let label = selected.map(|o| o.text.clone()).unwrap_or_default();
        let value = selected.map(|o| o.value.clone());
        let tabindex = doc.attr(control, "tabindex").unwrap_or_default().to_string();
        let width = settings
            .width
            .unwrap_or_else(|| layout::outer_width(doc, control));

        let view = ViewModel::new(&id, &label)
            .tabindex(&tabindex)
            .width(width)
            .options(&options, original);
        let container = doc
            .insert_before(control, view::render(&view))
            .ok_or(DropkickError::Detached(control))?;
        let parts = match PanelParts::locate(doc, container) {
            Ok(parts) => parts,
            Err(err) => {
                doc.remove(container);
                return Err(err);
            }
        };

        let theme = settings
            .theme
            .clone()
            .unwrap_or_else(|| classes::DEFAULT_THEME.to_string());
        doc.add_class(container, &classes::theme_class(&theme));

        doc.set_opacity(container, 0.0);
        self.animations.animate(
            doc,
            container,
            TweenProperty::Opacity,
            1.0,
            TransitionConfig::swing(settings.open_animation_delay_ms),
            Instant::now(),
        );
        self.deferred.push(Deferred::HideControl(control));

        log::debug!(
            "bound dropdown '{id}' to {control}: {} options, selected {:?}",
            options.len(),
            value
        );

        let instance = WidgetInstance {
            id,
            control,
            parts,
            options,
            original,
            original_label: label.clone(),
            current_row: original,
            value,
            label,
            theme,
            tabindex,
            settings,
        };
        self.instances.insert(control, instance);
        if !self.order.contains(&control) {
            self.order.push(control);
        }
        Ok(self.instances.get(&control))
    }

    /// Swap the theme class of the dropdown bound to `control`.
    /// Theme names are not validated.
    pub fn theme(
        &mut self,
        doc: &mut Document,
        control: NodeId,
        theme: &str,
    ) -> Result<(), DropkickError> {
        if self.env.legacy {
            return Ok(());
        }
        let instance = self.instance_mut(control)?;
        doc.remove_class(instance.parts.container, &classes::theme_class(&instance.theme));
        doc.add_class(instance.parts.container, &classes::theme_class(theme));
        log::debug!(
            "dropdown '{}' theme {} -> {theme}",
            instance.id,
            instance.theme
        );
        instance.theme = theme.to_string();
        Ok(())
    }

    /// Restore every bound dropdown to the selection it had when bound.
    ///
    /// Labels, native values, scroll positions and current rows are all
    /// restored. Change callbacks are not invoked; change notifications on
    /// the native controls still fire.
    pub fn reset(&mut self, doc: &mut Document) {
        if self.env.legacy {
            return;
        }
        let now = Instant::now();
        for control in &self.order {
            let Some(instance) = self.instances.get_mut(control) else {
                continue;
            };
            doc.set_text(instance.parts.label, instance.original_label.as_str());
            instance.label = instance.original_label.clone();
            panel::scroll_to(doc, &mut self.animations, instance, 0, now);

            let row = instance
                .original
                .or_else(|| (!instance.parts.rows.is_empty()).then_some(0));
            if let Some(row) = row {
                panel::set_current(doc, &mut self.animations, instance, row, now);
                selection::apply_selection(doc, instance, row, true);
            }
        }
        log::debug!("reset {} dropdowns", self.order.len());
    }

    /// Tear down and rebuild the dropdown bound to `control`, picking up
    /// options added to or removed from the native control since binding.
    pub fn reload(&mut self, doc: &mut Document, control: NodeId) -> Result<(), DropkickError> {
        if self.env.legacy {
            return Ok(());
        }
        let instance = self
            .instances
            .remove(&control)
            .ok_or(DropkickError::NotBound(control))?;
        self.animations.cancel(instance.parts.container);
        self.animations.cancel(instance.parts.option_list);
        doc.remove(instance.parts.container);
        log::debug!("reloading dropdown '{}'", instance.id);

        self.init(doc, control, instance.settings)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Event loop hooks
    // -------------------------------------------------------------------------

    /// Run work deferred to the next turn of the event loop.
    pub fn tick(&mut self, doc: &mut Document) {
        for task in self.deferred.drain(..) {
            match task {
                Deferred::HideControl(control) => doc.set_hidden(control, true),
            }
        }
    }

    pub fn has_pending_work(&self) -> bool {
        !self.deferred.is_empty() || self.animations.has_active_transitions()
    }

    /// Advance running tweens to `now`.
    pub fn animate(&mut self, doc: &mut Document, now: Instant) {
        self.animations.advance(doc, now);
    }

    // -------------------------------------------------------------------------
    // Controllers
    // -------------------------------------------------------------------------

    /// Commit option `row` of the dropdown bound to `control`.
    pub fn apply_selection(
        &mut self,
        doc: &mut Document,
        control: NodeId,
        row: usize,
        suppress_callback: bool,
    ) -> Result<(), DropkickError> {
        let instance = self.instance_mut(control)?;
        selection::apply_selection(doc, instance, row, suppress_callback);
        Ok(())
    }

    /// Open the panel of `control`, closing any other open panel.
    pub fn open(&mut self, doc: &mut Document, control: NodeId) -> Result<(), DropkickError> {
        if !self.is_bound(control) {
            return Err(DropkickError::NotBound(control));
        }
        self.open_exclusive(doc, control);
        Ok(())
    }

    pub fn close(&mut self, doc: &mut Document, control: NodeId) -> Result<(), DropkickError> {
        let instance = self.instance_mut(control)?;
        panel::close(doc, instance);
        Ok(())
    }

    /// Highlight `row` without committing it.
    pub fn set_current(
        &mut self,
        doc: &mut Document,
        control: NodeId,
        row: usize,
    ) -> Result<(), DropkickError> {
        let Self {
            instances,
            animations,
            ..
        } = self;
        let instance = instances
            .get_mut(&control)
            .ok_or(DropkickError::NotBound(control))?;
        panel::set_current(doc, animations, instance, row, Instant::now());
        Ok(())
    }

    pub(crate) fn open_exclusive(&mut self, doc: &mut Document, control: NodeId) {
        self.close_others(doc, control);
        if let Some(instance) = self.instances.get(&control) {
            panel::open(doc, instance);
        }
    }

    pub(crate) fn close_others(&self, doc: &mut Document, except: NodeId) {
        for instance in self.instances.values().filter(|i| i.control != except) {
            panel::close(doc, instance);
        }
    }

    pub(crate) fn close_all(&self, doc: &mut Document) {
        for instance in self.instances.values() {
            panel::close(doc, instance);
        }
    }

    /// Commit the highlighted row and close the panel.
    pub(crate) fn commit_current(&mut self, doc: &mut Document, control: NodeId) {
        let Some(instance) = self.instances.get_mut(&control) else {
            return;
        };
        if let Some(row) = instance.current_row {
            selection::apply_selection(doc, instance, row, false);
        }
        panel::close(doc, instance);
    }

    /// Move the highlight one row up or down, wrapping at the ends.
    pub(crate) fn step_current(&mut self, doc: &mut Document, control: NodeId, command: NavCommand) {
        let Self {
            instances,
            animations,
            ..
        } = self;
        let Some(instance) = instances.get_mut(&control) else {
            return;
        };
        let len = instance.parts.rows.len();
        let row = match command {
            NavCommand::Previous => keyboard::wrap_previous(instance.current_row, len),
            _ => keyboard::wrap_next(instance.current_row, len),
        };
        if let Some(row) = row {
            panel::set_current(doc, animations, instance, row, Instant::now());
        }
    }

    /// Dropdown that receives key presses: an open one, else a focused one.
    pub fn keyboard_target(&self, doc: &Document) -> Option<NodeId> {
        self.instances()
            .find(|i| i.is_open(doc))
            .or_else(|| self.instances().find(|i| i.is_focused(doc)))
            .map(|i| i.control)
    }
}

/// Widget id from the control's `id`, then `name`, then a generated one.
fn widget_id(doc: &Document, control: NodeId) -> String {
    doc.element_id(control)
        .or_else(|| doc.attr(control, "name"))
        .filter(|id| !id.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| generate_id("dk"))
}
