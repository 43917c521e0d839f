//! Track layout: the unique item set followed by verbatim replicas, wide
//! enough that the looping track never exposes a seam.

use cadenza_model::{Item, ItemId, ItemSet};

use crate::constants::track::MAX_REPLICATE_FACTOR;

/// Supplies the rendered width of an item. Implemented by the host's
/// layout provider; any `Fn(&Item<P>) -> f32` works.
pub trait MeasureItem<P> {
    fn width_of(&self, item: &Item<P>) -> f32;
}

impl<P, F> MeasureItem<P> for F
where
    F: Fn(&Item<P>) -> f32,
{
    fn width_of(&self, item: &Item<P>) -> f32 {
        self(item)
    }
}

/// Every item measures the same width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformWidth(pub f32);

impl<P> MeasureItem<P> for UniformWidth {
    fn width_of(&self, _item: &Item<P>) -> f32 {
        self.0
    }
}

/// How many extra copies of the unique set the track appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplicateFactor {
    /// Exactly this many copies.
    Fixed(usize),
    /// Enough copies to cover the viewport plus one frame step, never fewer
    /// than `minimum` (and never fewer than one).
    Auto { minimum: usize },
}

impl ReplicateFactor {
    /// Resolve to a concrete copy count for the measured unit width, never
    /// more than `MAX_REPLICATE_FACTOR`.
    pub fn resolve(
        self,
        unit_width_px: f32,
        viewport_width_px: f32,
        max_step_px: f32,
    ) -> usize {
        let copies = match self {
            Self::Fixed(n) => n,
            Self::Auto { minimum } => {
                let floor = minimum.max(1);
                if unit_width_px <= 0.0 || !unit_width_px.is_finite() {
                    return floor.min(MAX_REPLICATE_FACTOR);
                }
                let span = sanitize(viewport_width_px)
                    + sanitize(max_step_px.abs());
                let needed = (span / unit_width_px).ceil();
                if needed >= MAX_REPLICATE_FACTOR as f32 {
                    log::warn!(
                        "Viewport {viewport_width_px:.1}px needs {needed} copies of a {unit_width_px:.3}px unit; capping at {MAX_REPLICATE_FACTOR}"
                    );
                    MAX_REPLICATE_FACTOR
                } else {
                    (needed as usize).max(floor)
                }
            }
        };
        if copies > MAX_REPLICATE_FACTOR {
            log::warn!(
                "Replicate factor {copies} exceeds {MAX_REPLICATE_FACTOR}; clamping"
            );
        }
        copies.min(MAX_REPLICATE_FACTOR)
    }
}

/// Render identity of one placement. Replicas share the item id but not
/// the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacementKey {
    pub id: ItemId,
    /// 0 for the original, 1.. for replicas.
    pub replica: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub key: PlacementKey,
    /// Index of the source item in the `ItemSet`.
    pub source_index: usize,
    /// Left edge along the track.
    pub offset_px: f32,
    pub width_px: f32,
}

impl Placement {
    pub fn id(&self) -> &ItemId {
        &self.key.id
    }

    pub fn is_replica(&self) -> bool {
        self.key.replica > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackLayout {
    placements: Vec<Placement>,
    unit_width_px: f32,
    unique_count: usize,
    replicate_factor: usize,
}

impl TrackLayout {
    /// Zero-width layout; the engine stays idle on it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Lay out `items` followed by `replicate_factor` full copies (clamped
    /// to `MAX_REPLICATE_FACTOR`).
    ///
    /// Returns an empty, zero-width layout when `items` is empty or every
    /// item measures zero (hidden container, not laid out yet).
    pub fn build<P, M>(
        items: &ItemSet<P>,
        replicate_factor: usize,
        measure: &M,
    ) -> Self
    where
        M: MeasureItem<P> + ?Sized,
    {
        Self::from_originals(measure_originals(items, measure))
            .with_replicas(replicate_factor)
    }

    /// Measure first, then resolve `factor` against the viewport.
    pub fn build_for_viewport<P, M>(
        items: &ItemSet<P>,
        factor: ReplicateFactor,
        viewport_width_px: f32,
        max_step_px: f32,
        measure: &M,
    ) -> Self
    where
        M: MeasureItem<P> + ?Sized,
    {
        let base = Self::from_originals(measure_originals(items, measure));
        let copies =
            factor.resolve(base.unit_width_px, viewport_width_px, max_step_px);
        let layout = base.with_replicas(copies);
        if !layout.is_empty() && !layout.covers_viewport(viewport_width_px) {
            log::warn!(
                "Track replicas ({copies} x {:.1}px) do not cover the {:.1}px viewport; the loop may show a seam",
                layout.unit_width_px,
                viewport_width_px
            );
        }
        layout
    }

    fn from_originals(originals: Vec<Placement>) -> Self {
        let unit_width_px: f32 = originals.iter().map(|p| p.width_px).sum();
        if originals.is_empty() || unit_width_px <= 0.0 {
            if !originals.is_empty() {
                log::debug!(
                    "All {} track items measured zero width; skipping layout",
                    originals.len()
                );
            }
            return Self::empty();
        }
        Self {
            unique_count: originals.len(),
            placements: originals,
            unit_width_px,
            replicate_factor: 0,
        }
    }

    /// Rebuild the replica tail from the original placements without
    /// re-measuring.
    pub fn with_replicas(&self, replicate_factor: usize) -> Self {
        if self.unique_count == 0 {
            return Self::empty();
        }
        let replicate_factor = replicate_factor.min(MAX_REPLICATE_FACTOR);
        let originals = &self.placements[..self.unique_count];
        let mut placements = Vec::with_capacity(
            self.unique_count
                .saturating_mul(replicate_factor.saturating_add(1)),
        );
        placements.extend_from_slice(originals);
        for replica in 1..=replicate_factor {
            let shift = self.unit_width_px * replica as f32;
            placements.extend(originals.iter().map(|p| Placement {
                key: PlacementKey {
                    id: p.key.id.clone(),
                    replica,
                },
                source_index: p.source_index,
                offset_px: p.offset_px + shift,
                width_px: p.width_px,
            }));
        }
        Self {
            placements,
            unit_width_px: self.unit_width_px,
            unique_count: self.unique_count,
            replicate_factor,
        }
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Summed width of one unique pass through the item set.
    pub fn unit_width_px(&self) -> f32 {
        self.unit_width_px
    }

    pub fn unique_count(&self) -> usize {
        self.unique_count
    }

    /// Number of replica placements (excluding originals).
    pub fn replica_count(&self) -> usize {
        self.placements.len() - self.unique_count
    }

    pub fn replicate_factor(&self) -> usize {
        self.replicate_factor
    }

    pub fn track_width_px(&self) -> f32 {
        self.unit_width_px * (self.replicate_factor + 1) as f32
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// No-seam invariant: replicas alone span at least the viewport.
    pub fn covers_viewport(&self, viewport_width_px: f32) -> bool {
        self.replicate_factor as f32 * self.unit_width_px
            >= sanitize(viewport_width_px)
    }
}

fn measure_originals<P, M>(items: &ItemSet<P>, measure: &M) -> Vec<Placement>
where
    M: MeasureItem<P> + ?Sized,
{
    let mut offset = 0.0;
    items
        .iter()
        .enumerate()
        .map(|(source_index, item)| {
            let width_px = sanitize(measure.width_of(item));
            let placement = Placement {
                key: PlacementKey {
                    id: item.id.clone(),
                    replica: 0,
                },
                source_index,
                offset_px: offset,
                width_px,
            };
            offset += width_px;
            placement
        })
        .collect()
}

/// Negative or non-finite measurements count as zero.
fn sanitize(px: f32) -> f32 {
    if px.is_finite() && px > 0.0 { px } else { 0.0 }
}
