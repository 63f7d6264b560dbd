//! One-time enhancement of rendered table markup.

use log::{debug, info};

use super::table::{enhancing_root, sortable_headers, trigger_of};
use super::toggle::{apply_sort, plan_sort, read_indicator, toggle_sort, SortMode};
use crate::config::GridConfig;
use crate::dom::{Dom, NodeData, NodeId};
use crate::error::GridError;
use crate::event::{ListenerContext, ListenerHandle, ListenerPhase, ListenerRegistry};

/// Sortable headers under `root` that no nested enhanced root has claimed.
fn owned_headers(dom: &Dom, root: NodeId, config: &GridConfig) -> Vec<NodeId> {
    sortable_headers(dom, root, config)
        .into_iter()
        .filter(|&header| enhancing_root(dom, header, config).map_or(true, |owner| owner == root))
        .collect()
}

/// Insert a trigger button into every sortable header under `root` that
/// lacks one. The header's existing content moves into the button.
///
/// Headers inside a nested enhanced root are left to that root. Returns how
/// many triggers were inserted; a second call returns 0.
pub fn install_triggers(dom: &mut Dom, root: NodeId, config: &GridConfig) -> usize {
    let mut inserted = 0;
    for header in owned_headers(dom, root, config) {
        if trigger_of(dom, header, config).is_some() {
            continue;
        }
        let content = dom.children(header).to_vec();
        let button = dom.insert_child(
            header,
            NodeData::new("button")
                .with_class(config.trigger_class.as_str())
                .with_attr("type", "button"),
        );
        for child in content {
            dom.append(child, button);
        }
        inserted += 1;
    }
    inserted
}

/// A live enhancement of one root. Dropping it does not detach anything;
/// call [`Enhancement::cleanup`].
#[derive(Debug)]
pub struct Enhancement {
    root: NodeId,
    listener: ListenerHandle,
    init_attr: String,
}

impl Enhancement {
    /// The enhanced root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether this enhancement still owns its listener. A duplicate
    /// initialization yields an inactive enhancement.
    pub fn is_active(&self) -> bool {
        self.listener.is_active()
    }

    /// Remove the delegated listener and the initialization marker.
    ///
    /// Safe to call repeatedly; returns whether this call detached anything.
    pub fn cleanup(&mut self, dom: &mut Dom, listeners: &mut ListenerRegistry) -> bool {
        if !self.listener.remove(listeners) {
            return false;
        }
        if dom.contains(self.root) {
            dom.remove_attr(self.root, &self.init_attr);
        }
        debug!("removed sortable table enhancement from {:?}", self.root);
        true
    }
}

/// Make the tables under `root` sortable.
///
/// Installs trigger buttons, replays any `aria-sort` already present and
/// attaches one delegated activation listener to `root`. A root that was
/// already enhanced is left untouched and an inactive [`Enhancement`] is
/// returned.
///
/// Every header belongs to exactly one enhanced root, the nearest one above
/// it. Tables already enhanced below `root` keep their own listener and are
/// skipped here.
pub fn enhance(
    dom: &mut Dom,
    listeners: &mut ListenerRegistry,
    root: NodeId,
    config: &GridConfig,
) -> Result<Enhancement, GridError> {
    if !dom.contains(root) {
        return Err(GridError::NodeNotFound);
    }
    if dom.attr(root, &config.init_attr).is_some() {
        info!("sortable table at {root:?} is already initialised; ignoring");
        return Ok(Enhancement {
            root,
            listener: ListenerHandle::inert(),
            init_attr: config.init_attr.clone(),
        });
    }

    dom.set_attr(root, &config.init_attr, "");
    let inserted = install_triggers(dom, root, config);

    for header in owned_headers(dom, root, config) {
        if let Some(direction) = read_indicator(dom, header).direction() {
            let plan = plan_sort(dom, header, SortMode::Replay(direction), config)?;
            apply_sort(dom, &plan, config);
        }
    }

    let handler_config = config.clone();
    let listener = listeners.add(root, ListenerPhase::Enhance, move |ctx: &mut ListenerContext<'_>| {
        let Some(header) = activated_header(ctx.dom, ctx.event.target, &handler_config) else {
            return Ok(());
        };
        if enhancing_root(ctx.dom, header, &handler_config) != Some(ctx.current) {
            return Ok(());
        }
        toggle_sort(ctx.dom, header, &handler_config).map(|_| ())
    });

    debug!("enhanced sortable table at {root:?} ({inserted} triggers)");
    Ok(Enhancement {
        root,
        listener,
        init_attr: config.init_attr.clone(),
    })
}

/// The sortable header whose trigger contains `target`.
pub fn activated_header(dom: &Dom, target: NodeId, config: &GridConfig) -> Option<NodeId> {
    let trigger = dom.closest(target, |d| d.is("button") && d.has_class(&config.trigger_class))?;
    let header = dom.parent(trigger)?;
    dom.get(header)
        .is_some_and(|d| d.is("th") && d.has_attr(&config.sortable_attr))
        .then_some(header)
}
