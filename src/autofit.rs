//! Content-size-driven height constraint fitting for scrollable
//! containers.
//!
//! A [`ContentSizeAutoFitter`] subscribes to content-size changes on a
//! host container and keeps a height-equal layout constraint synchronized
//! with the content, clamped between a minimum and an optional maximum.
//! The fitter never owns the container: it holds a [`Weak`] back
//! reference keyed by pointer identity in an explicit observation map, so
//! teardown is a single map erase and a notification that races with
//! container destruction is silently dropped.
//!
//! Containers live in `Rc<RefCell<_>>`, which makes the fitter `!Send`:
//! every call happens on the thread that owns the containers. Hosts whose
//! change notifications originate off that thread must redispatch onto
//! the owning thread before calling
//! [`content_size_changed`](ContentSizeAutoFitter::content_size_changed).
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use fitkit::autofit::*;
//! use fitkit::geometry::{EdgeInsets, Size};
//!
//! struct List {
//!     content: Size,
//!     constraints: Vec<LayoutConstraint>,
//! }
//!
//! impl ScrollContainer for List {
//!     fn content_size(&self) -> Size { self.content }
//!     fn content_inset(&self) -> EdgeInsets { EdgeInsets::ZERO }
//!     fn constraints_mut(&mut self) -> &mut Vec<LayoutConstraint> { &mut self.constraints }
//!     fn begin_observing(&mut self) -> ObservationToken { ObservationToken(1) }
//!     fn end_observing(&mut self, _token: ObservationToken) {}
//! }
//!
//! let list = Rc::new(RefCell::new(List { content: Size::new(320.0, 500.0), constraints: Vec::new() }));
//! let mut fitter = ContentSizeAutoFitter::new();
//! let id = fitter.enable(&list, AutoFitConfig::new(100.0).maximum_height(300.0));
//!
//! // Host delivers a content-size change; the constraint clamps to 300.
//! fitter.content_size_changed(id);
//! assert_eq!(list.borrow().constraints[0].constant, 300.0);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::geometry::{EdgeInsets, Size};

/// Which dimension a layout constraint pins.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayoutAttribute {
    Width,
    Height,
}

/// How the constrained attribute relates to the constant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayoutRelation {
    Equal,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

/// A dimensional layout constraint owned by the container's layout
/// system. The fitter only ever mutates `constant`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutConstraint {
    /// Constrained dimension.
    pub attribute: LayoutAttribute,
    /// Relation to the constant.
    pub relation: LayoutRelation,
    /// Constant the attribute is constrained to, in points.
    pub constant: f64,
    /// Whether the layout system enforces this constraint.
    pub active: bool,
}

impl LayoutConstraint {
    /// Create an inactive constraint.
    pub const fn new(attribute: LayoutAttribute, relation: LayoutRelation, constant: f64) -> Self {
        Self {
            attribute,
            relation,
            constant,
            active: false,
        }
    }

    /// Height-equals-constant constraint, the shape the auto-fitter
    /// creates and maintains.
    pub const fn height_equal(constant: f64) -> Self {
        Self::new(LayoutAttribute::Height, LayoutRelation::Equal, constant)
    }

    /// Mark the constraint as enforced.
    pub fn activate(&mut self) {
        self.active = true;
    }
}

/// Host-issued handle identifying one active content-size subscription.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObservationToken(pub u64);

/// The surface the auto-fitter needs from a scrollable container.
///
/// Implemented by the host UI layer (and by test doubles). The
/// `begin_observing`/`end_observing` pair is the host's change-notification
/// subscription; the host calls
/// [`ContentSizeAutoFitter::content_size_changed`] whenever the
/// subscription fires.
pub trait ScrollContainer {
    /// Current content extent.
    fn content_size(&self) -> Size;
    /// Content insets added to the fitted height.
    fn content_inset(&self) -> EdgeInsets;
    /// The container's layout constraints.
    fn constraints_mut(&mut self) -> &mut Vec<LayoutConstraint>;
    /// Subscribe to content-size change notifications.
    fn begin_observing(&mut self) -> ObservationToken;
    /// Cancel a subscription issued by [`begin_observing`](Self::begin_observing).
    fn end_observing(&mut self, token: ObservationToken);
}

/// Height-fitting policy for one observed container.
///
/// The application may mutate the config at any time through
/// [`ContentSizeAutoFitter::config_mut`]; it is read on every
/// content-size change.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AutoFitConfig {
    /// When false, changes are observed but layout is left untouched.
    pub enabled: bool,
    /// Lower bound for the fitted height.
    pub minimum_height: f64,
    /// Optional upper bound; never below `minimum_height`.
    pub maximum_height: Option<f64>,
}

impl AutoFitConfig {
    /// Enabled config with the given minimum height (clamped to ≥ 0) and
    /// no maximum.
    pub fn new(minimum_height: f64) -> Self {
        Self {
            enabled: true,
            minimum_height: minimum_height.max(0.0),
            maximum_height: None,
        }
    }

    /// Set the maximum height, clamped to at least the minimum.
    pub fn maximum_height(mut self, maximum: f64) -> Self {
        self.maximum_height = Some(maximum.max(self.minimum_height));
        self
    }

    /// Set whether content-size changes mutate layout.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Fitted height for a content height plus vertical inset.
    fn fit(&self, content_height: f64) -> f64 {
        let height = content_height.max(self.minimum_height);
        match self.maximum_height {
            Some(max) => height.min(max),
            None => height,
        }
    }
}

impl Default for AutoFitConfig {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Stable identity of an observed container, derived from `Rc` pointer
/// identity.
///
/// Valid only while the fitter holds an observation for that container:
/// after the container is destroyed, the allocator may hand the same
/// address to a new container, so a retained id must not outlive its
/// entry. [`ContentSizeAutoFitter::enable`] replaces a stale entry left
/// at a reused address rather than treating it as already observed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContainerId(usize);

struct Observation<C> {
    container: Weak<RefCell<C>>,
    token: ObservationToken,
    config: AutoFitConfig,
}

/// Keeps height constraints synchronized with content sizes across any
/// number of containers.
///
/// State machine per container: Detached → (enable) → Observing →
/// (disable, or container destruction detected on the next notification)
/// → Detached. [`enable`](Self::enable) while Observing and
/// [`disable`](Self::disable) while Detached are no-ops, so at most one
/// subscription exists per container.
pub struct ContentSizeAutoFitter<C: ScrollContainer> {
    observations: HashMap<ContainerId, Observation<C>>,
}

impl<C: ScrollContainer> ContentSizeAutoFitter<C> {
    /// A fitter observing nothing.
    pub fn new() -> Self {
        Self {
            observations: HashMap::new(),
        }
    }

    /// Identity key for a container.
    pub fn id_of(container: &Rc<RefCell<C>>) -> ContainerId {
        ContainerId(Rc::as_ptr(container) as usize)
    }

    /// Start observing `container` with `config`.
    ///
    /// No-op (keeping the existing subscription and config) when the
    /// container is already observed. Returns the container's id, which
    /// the host passes back from its notification callback.
    ///
    /// A leftover entry whose container has been destroyed — possible
    /// when the new container's allocation reuses the old address —
    /// is discarded and replaced with a fresh subscription.
    pub fn enable(&mut self, container: &Rc<RefCell<C>>, config: AutoFitConfig) -> ContainerId {
        let id = Self::id_of(container);
        if let Some(existing) = self.observations.get(&id) {
            if existing.container.upgrade().is_some() {
                return id;
            }
            log::debug!("container {id:?} reuses a destroyed container's address; resubscribing");
            self.observations.remove(&id);
        }
        let token = container.borrow_mut().begin_observing();
        self.observations.insert(
            id,
            Observation {
                container: Rc::downgrade(container),
                token,
                config,
            },
        );
        log::trace!("auto-fit enabled for container {id:?}");
        id
    }

    /// Stop observing `container` and release its subscription.
    /// No-op when the container is not observed.
    pub fn disable(&mut self, container: &Rc<RefCell<C>>) {
        let id = Self::id_of(container);
        let Some(observation) = self.observations.remove(&id) else {
            return;
        };
        if let Some(container) = observation.container.upgrade() {
            container.borrow_mut().end_observing(observation.token);
        }
        log::trace!("auto-fit disabled for container {id:?}");
    }

    /// Whether `container` currently has an active observation.
    pub fn is_observing(&self, container: &Rc<RefCell<C>>) -> bool {
        self.observations.contains_key(&Self::id_of(container))
    }

    /// Number of active observations.
    pub fn observed_count(&self) -> usize {
        self.observations.len()
    }

    /// Mutable access to an observed container's config.
    pub fn config_mut(&mut self, container: &Rc<RefCell<C>>) -> Option<&mut AutoFitConfig> {
        self.observations
            .get_mut(&Self::id_of(container))
            .map(|observation| &mut observation.config)
    }

    /// Handle a content-size change notification for `id`.
    ///
    /// The host's subscription callback calls this, on the thread owning
    /// the container. Idempotent: repeated notifications with an
    /// unchanged content size leave the same single constraint at the
    /// same constant. A notification for a container that has been
    /// destroyed (or was never observed) is dropped silently; a dead
    /// weak reference also erases the observation entry.
    pub fn content_size_changed(&mut self, id: ContainerId) {
        let Some(observation) = self.observations.get(&id) else {
            return;
        };
        let Some(container) = observation.container.upgrade() else {
            log::debug!("content-size change for destroyed container {id:?}; dropping observation");
            self.observations.remove(&id);
            return;
        };
        let config = observation.config;
        if !config.enabled {
            return;
        }

        let mut container = container.borrow_mut();
        let content_height = container.content_size().height + container.content_inset().vertical();
        let height = config.fit(content_height);

        let constraints = container.constraints_mut();
        match constraints.iter_mut().find(|c| {
            c.attribute == LayoutAttribute::Height && c.relation == LayoutRelation::Equal
        }) {
            Some(constraint) => constraint.constant = height,
            None => {
                let mut constraint = LayoutConstraint::height_equal(height);
                constraint.activate();
                constraints.push(constraint);
            }
        }
        log::trace!("auto-fit container {id:?} height -> {height}");
    }
}

impl<C: ScrollContainer> Default for ContentSizeAutoFitter<C> {
    fn default() -> Self {
        Self::new()
    }
}
