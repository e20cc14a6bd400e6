//! Hide Others
//!
//! Marks every subtree that does not contain a target with a control
//! attribute (`aria-hidden` or `inert`) and hands back an [`Undo`] that
//! removes exactly what that call added.
//!
//! Calls layer through shared reference counts:
//! - per control attribute, how many outstanding calls hid each node
//! - per marker name, how many outstanding calls marked each node
//!
//! An attribute is removed only when its count drops back to zero, and a
//! control attribute the page set before the first call is never removed.
//! Once no call is outstanding all counts are dropped.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::is_valid_attribute_name;
use crate::{aria, A11yError, HideOthersConfig, MaskTree};

static NEXT_MANAGER_ID: AtomicU64 = AtomicU64::new(1);

/// Counts for one control attribute
#[derive(Debug)]
struct ControlState<N> {
    counters: HashMap<N, usize>,
    /// Nodes whose control attribute predates our first touch
    uncontrolled: HashSet<N>,
}

impl<N> Default for ControlState<N> {
    fn default() -> Self {
        Self {
            counters: HashMap::new(),
            uncontrolled: HashSet::new(),
        }
    }
}

/// Owns the masking counters shared by every caller.
///
/// Create one per document (or per application) and pass it to everything
/// that opens modals, popovers and similar surfaces.
#[derive(Debug)]
pub struct AriaHiddenManager<N> {
    /// Ties each [`Undo`] to the manager that counted it
    id: u64,
    config: HideOthersConfig,
    controls: HashMap<String, ControlState<N>>,
    markers: HashMap<String, HashMap<N, usize>>,
    lock_count: usize,
}

impl<N: Copy + Eq + Hash + Debug> AriaHiddenManager<N> {
    pub fn new() -> Self {
        Self::from_config(HideOthersConfig::default())
    }

    /// Create a manager with custom default markers
    pub fn with_config(config: HideOthersConfig) -> Result<Self, A11yError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: HideOthersConfig) -> Self {
        Self {
            id: NEXT_MANAGER_ID.fetch_add(1, Ordering::Relaxed),
            config,
            controls: HashMap::new(),
            markers: HashMap::new(),
            lock_count: 0,
        }
    }

    pub fn config(&self) -> &HideOthersConfig {
        &self.config
    }

    /// Hide everything under `root` except `targets` and their ancestors
    /// with `aria-hidden="true"`.
    ///
    /// `root` defaults to the tree's default root for the first target. If
    /// there is none the call does nothing and returns a no-op [`Undo`].
    /// `marker` defaults to the configured hidden marker.
    pub fn hide_others<T, I>(
        &mut self,
        tree: &mut T,
        targets: I,
        root: Option<N>,
        marker: Option<&str>,
    ) -> Undo<N>
    where
        T: MaskTree<Node = N>,
        I: IntoIterator<Item = N>,
    {
        let marker = marker.map_or_else(|| self.config.hidden_marker.clone(), str::to_string);
        let mut targets: Vec<N> = targets.into_iter().collect();

        let Some(root) = resolve_root(tree, &targets, root) else {
            tracing::debug!("No document context for {:?}, nothing to hide", targets);
            return Undo::noop(self.id, marker, aria::HIDDEN);
        };

        if self.config.preserve_live_regions {
            targets.extend(live_regions(tree, root));
        }

        self.mark_others(tree, targets, root, &marker, aria::HIDDEN)
    }

    /// Like [`hide_others`](Self::hide_others) but sets `inert`
    pub fn inert_others<T, I>(
        &mut self,
        tree: &mut T,
        targets: I,
        root: Option<N>,
        marker: Option<&str>,
    ) -> Undo<N>
    where
        T: MaskTree<Node = N>,
        I: IntoIterator<Item = N>,
    {
        let marker = marker.map_or_else(|| self.config.inert_marker.clone(), str::to_string);
        self.apply_attribute_to_others(tree, targets, root, &marker, aria::INERT)
    }

    /// `inert` where the tree supports it, `aria-hidden` otherwise
    pub fn suppress_others<T, I>(
        &mut self,
        tree: &mut T,
        targets: I,
        root: Option<N>,
        marker: Option<&str>,
    ) -> Undo<N>
    where
        T: MaskTree<Node = N>,
        I: IntoIterator<Item = N>,
    {
        let marker = marker.map_or_else(|| self.config.suppressed_marker.clone(), str::to_string);
        if tree.supports_inert() {
            self.inert_others(tree, targets, root, Some(&marker))
        } else {
            self.hide_others(tree, targets, root, Some(&marker))
        }
    }

    /// Mark others with an arbitrary control attribute
    pub fn apply_attribute_to_others<T, I>(
        &mut self,
        tree: &mut T,
        targets: I,
        root: Option<N>,
        marker: &str,
        control_attribute: &str,
    ) -> Undo<N>
    where
        T: MaskTree<Node = N>,
        I: IntoIterator<Item = N>,
    {
        let targets: Vec<N> = targets.into_iter().collect();
        match resolve_root(tree, &targets, root) {
            Some(root) => self.mark_others(tree, targets, root, marker, control_attribute),
            None => {
                tracing::debug!("No document context for {:?}, nothing to mark", targets);
                Undo::noop(self.id, marker.to_string(), control_attribute)
            }
        }
    }

    fn mark_others<T: MaskTree<Node = N>>(
        &mut self,
        tree: &mut T,
        mut targets: Vec<N>,
        root: N,
        marker: &str,
        control_attribute: &str,
    ) -> Undo<N> {
        if !is_valid_attribute_name(marker) || !is_valid_attribute_name(control_attribute) {
            tracing::warn!("Invalid marker {:?} or control attribute {:?}, nothing to mark", marker, control_attribute);
            return Undo::noop(self.id, marker.to_string(), control_attribute);
        }
        // A marker sharing the control attribute's name would strip attributes the page owns
        if marker == control_attribute {
            tracing::warn!("Marker {} is the control attribute itself, nothing to mark", marker);
            return Undo::noop(self.id, marker.to_string(), control_attribute);
        }

        targets.retain(|&target| {
            let inside = tree.contains(root, target);
            if !inside {
                tracing::warn!("Target {:?} is not inside {:?}, ignoring it", target, root);
            }
            inside
        });

        let mut walk = Walk {
            tree,
            targets: &targets,
            control: self.controls.entry(control_attribute.to_string()).or_default(),
            markers: self.markers.entry(marker.to_string()).or_default(),
            marker,
            control_attribute,
            hidden: Vec::new(),
        };
        walk.deep(root);
        let hidden = walk.hidden;

        self.lock_count += 1;
        tracing::debug!(
            "Set {} on {} nodes (marker {}), {} calls outstanding",
            control_attribute,
            hidden.len(),
            marker,
            self.lock_count
        );

        Undo {
            owner: self.id,
            hidden,
            marker: marker.to_string(),
            control_attribute: control_attribute.to_string(),
            counted: true,
        }
    }

    fn release<T: MaskTree<Node = N>>(&mut self, tree: &mut T, undo: Undo<N>) {
        if !undo.counted {
            return;
        }
        if undo.owner != self.id {
            tracing::warn!(
                "Undo for marker {} belongs to another manager, ignoring revert",
                undo.marker
            );
            return;
        }

        match (
            self.controls.get_mut(&undo.control_attribute),
            self.markers.get_mut(&undo.marker),
        ) {
            (Some(control), Some(markers)) => {
                for &node in &undo.hidden {
                    restore(tree, control, markers, node, &undo.marker, &undo.control_attribute);
                }
            }
            _ if undo.hidden.is_empty() => {}
            _ => tracing::warn!(
                "No {} state for marker {}",
                undo.control_attribute,
                undo.marker
            ),
        }

        self.lock_count = self.lock_count.saturating_sub(1);
        tracing::debug!(
            "Released {} nodes (marker {}), {} calls outstanding",
            undo.hidden.len(),
            undo.marker,
            self.lock_count
        );

        if self.lock_count == 0 {
            self.reset();
        }
    }

    /// Drop every count. Runs whenever the last outstanding call is reverted.
    fn reset(&mut self) {
        self.controls.clear();
        self.markers.clear();
        tracing::debug!("No masks outstanding, counters cleared");
    }

    /// Calls whose [`Undo`] has not been reverted yet
    pub fn outstanding(&self) -> usize {
        self.lock_count
    }

    /// No outstanding calls and no counts held
    pub fn is_idle(&self) -> bool {
        self.lock_count == 0 && self.tracked_nodes() == 0
    }

    /// Total count entries held across all control attributes and markers
    pub fn tracked_nodes(&self) -> usize {
        let controls: usize = self
            .controls
            .values()
            .map(|c| c.counters.len() + c.uncontrolled.len())
            .sum();
        let markers: usize = self.markers.values().map(HashMap::len).sum();
        controls + markers
    }

    /// Outstanding calls that set `control_attribute` on `node`
    pub fn control_count(&self, control_attribute: &str, node: N) -> usize {
        self.controls
            .get(control_attribute)
            .and_then(|c| c.counters.get(&node))
            .copied()
            .unwrap_or(0)
    }

    /// Outstanding calls that hid `node` with `aria-hidden`
    pub fn hidden_count(&self, node: N) -> usize {
        self.control_count(aria::HIDDEN, node)
    }

    /// Outstanding calls that marked `node` with `marker`
    pub fn marker_count(&self, marker: &str, node: N) -> usize {
        self.markers
            .get(marker)
            .and_then(|m| m.get(&node))
            .copied()
            .unwrap_or(0)
    }

    /// Whether `node` already had `control_attribute` before it was first masked
    pub fn is_uncontrolled(&self, control_attribute: &str, node: N) -> bool {
        self.controls
            .get(control_attribute)
            .is_some_and(|c| c.uncontrolled.contains(&node))
    }
}

impl<N: Copy + Eq + Hash + Debug> Default for AriaHiddenManager<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reverts one masking call.
///
/// Reverting consumes the handle, so a call can be undone at most once.
/// Only the manager that created it can revert it; any other manager
/// ignores it.
#[must_use = "nodes stay masked until the Undo is reverted"]
#[derive(Debug)]
pub struct Undo<N> {
    owner: u64,
    hidden: Vec<N>,
    marker: String,
    control_attribute: String,
    /// Whether this call counts as outstanding in its manager
    counted: bool,
}

impl<N: Copy + Eq + Hash + Debug> Undo<N> {
    fn noop(owner: u64, marker: String, control_attribute: &str) -> Self {
        Self {
            owner,
            hidden: Vec::new(),
            marker,
            control_attribute: control_attribute.to_string(),
            counted: false,
        }
    }

    /// Remove what the originating call added, unless another outstanding
    /// call still needs it.
    pub fn revert<T: MaskTree<Node = N>>(self, manager: &mut AriaHiddenManager<N>, tree: &mut T) {
        manager.release(tree, self);
    }

    /// Nodes this call masked, in document order
    pub fn hidden_nodes(&self) -> &[N] {
        &self.hidden
    }

    pub fn len(&self) -> usize {
        self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn control_attribute(&self) -> &str {
        &self.control_attribute
    }

    /// True when the call found no document context and changed nothing
    pub fn is_noop(&self) -> bool {
        !self.counted
    }
}

/// One depth-first pass over the tree
struct Walk<'a, T: MaskTree> {
    tree: &'a mut T,
    targets: &'a [T::Node],
    control: &'a mut ControlState<T::Node>,
    markers: &'a mut HashMap<T::Node, usize>,
    marker: &'a str,
    control_attribute: &'a str,
    hidden: Vec<T::Node>,
}

impl<T: MaskTree> Walk<'_, T> {
    fn deep(&mut self, parent: T::Node) {
        if self.targets.contains(&parent) {
            return;
        }

        for node in self.tree.children(parent) {
            if self.targets.contains(&node) {
                continue;
            }
            if self.targets.iter().any(|&target| self.tree.contains(node, target)) {
                self.deep(node);
            } else {
                self.mark(node);
            }
        }
    }

    fn mark(&mut self, node: T::Node) {
        let already_hidden =
            aria::is_hidden_value(self.tree.get_attribute(node, self.control_attribute));
        let counter_value = increment(&mut self.control.counters, node);
        let marker_value = increment(&mut *self.markers, node);
        self.hidden.push(node);

        if counter_value == 1 && already_hidden {
            self.control.uncontrolled.insert(node);
        }

        tracing::trace!(
            "Masking {:?} ({} = {}, {} = {})",
            node,
            self.control_attribute,
            counter_value,
            self.marker,
            marker_value
        );

        // Counts stay recorded on failure so the matching revert stays balanced.
        if marker_value == 1 {
            let marker = self.marker;
            self.write(node, marker);
        }
        if !already_hidden {
            let control_attribute = self.control_attribute;
            self.write(node, control_attribute);
        }
    }

    fn write(&mut self, node: T::Node, name: &str) {
        if let Err(err) = self.tree.set_attribute(node, name, aria::TRUE) {
            tracing::error!("Cannot set {} on {:?}: {}", name, node, err);
        }
    }
}

fn restore<T: MaskTree>(
    tree: &mut T,
    control: &mut ControlState<T::Node>,
    markers: &mut HashMap<T::Node, usize>,
    node: T::Node,
    marker: &str,
    control_attribute: &str,
) {
    match decrement(&mut control.counters, node) {
        Some(0) => {
            if !control.uncontrolled.remove(&node) {
                if let Err(err) = tree.remove_attribute(node, control_attribute) {
                    tracing::error!("Cannot remove {} from {:?}: {}", control_attribute, node, err);
                }
            }
        }
        Some(_) => {}
        None => tracing::warn!("{:?} has no {} count to release", node, control_attribute),
    }

    match decrement(markers, node) {
        Some(0) => {
            if let Err(err) = tree.remove_attribute(node, marker) {
                tracing::error!("Cannot remove {} from {:?}: {}", marker, node, err);
            }
        }
        Some(_) => {}
        None => tracing::warn!("{:?} has no {} count to release", node, marker),
    }
}

fn increment<N: Eq + Hash>(counts: &mut HashMap<N, usize>, node: N) -> usize {
    let count = counts.entry(node).or_insert(0);
    *count += 1;
    *count
}

/// Decrement and drop the entry at zero. `None` if the node had no count.
fn decrement<N: Eq + Hash>(counts: &mut HashMap<N, usize>, node: N) -> Option<usize> {
    let count = counts.get_mut(&node)?;
    *count -= 1;
    let value = *count;
    if value == 0 {
        counts.remove(&node);
    }
    Some(value)
}

fn resolve_root<T: MaskTree>(tree: &T, targets: &[T::Node], root: Option<T::Node>) -> Option<T::Node> {
    root.or_else(|| targets.first().and_then(|&target| tree.default_root(target)))
}

/// `aria-live` regions and scripts under `root`
fn live_regions<T: MaskTree>(tree: &T, root: T::Node) -> Vec<T::Node> {
    let mut found = Vec::new();
    let mut stack = tree.children(root);
    while let Some(node) = stack.pop() {
        if tree.get_attribute(node, aria::LIVE).is_some() || tree.local_name(node) == Some("script") {
            found.push(node);
        }
        stack.extend(tree.children(node));
    }
    found
}
