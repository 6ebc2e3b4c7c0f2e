//! Carousels
//!
//! The slide index is the only state. Rendering is a pure function of it:
//! the item and indicator at the index carry the active marker, every other
//! one is cleared, so rendering the same index twice changes nothing.

use switchboard_dom::NodeId;
use tracing::{debug, trace};

use crate::engine::Engine;
use crate::registry::{Target, WidgetState};

/// Cyclic slide index over a non-empty set of items
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarouselState {
    index: usize,
    count: usize,
}

impl CarouselState {
    /// `None` for an empty carousel; an out-of-range start index becomes 0
    pub fn new(count: usize, index: usize) -> Option<Self> {
        if count == 0 {
            return None;
        }
        let index = if index < count { index } else { 0 };
        Some(Self { index, count })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Next slide, wrapping from the last to the first
    pub fn next(self) -> Self {
        Self {
            index: (self.index + 1) % self.count,
            ..self
        }
    }

    /// Previous slide, wrapping from the first to the last
    pub fn prev(self) -> Self {
        Self {
            index: (self.index + self.count - 1) % self.count,
            ..self
        }
    }

    /// Jump to `index`; out-of-range indices leave the state unchanged
    pub fn go_to(self, index: usize) -> Self {
        if index < self.count {
            Self { index, ..self }
        } else {
            self
        }
    }

    /// Adjust to a new item count, keeping the index when it still fits
    pub fn resized(self, count: usize) -> Self {
        let count = count.max(1);
        Self {
            index: if self.index < count { self.index } else { 0 },
            count,
        }
    }
}

impl Engine {
    pub fn carousel_index(&self, carousel: NodeId) -> Option<usize> {
        match self.registry.state(carousel) {
            Some(WidgetState::Carousel { slides, .. }) => Some(slides.index()),
            _ => None,
        }
    }

    pub fn carousel_next(&mut self, carousel: NodeId) -> Option<usize> {
        self.step_carousel(carousel, CarouselState::next)
    }

    pub fn carousel_prev(&mut self, carousel: NodeId) -> Option<usize> {
        self.step_carousel(carousel, CarouselState::prev)
    }

    pub fn carousel_go_to(&mut self, carousel: NodeId, index: usize) -> Option<usize> {
        self.step_carousel(carousel, |slides| slides.go_to(index))
    }

    /// Jump to the slide paired with `indicator`
    ///
    /// The pairing is by position among the surviving indicators, so it
    /// stays in step with rendering after indicators are removed.
    pub fn carousel_show_indicator(&mut self, carousel: NodeId, indicator: NodeId) -> Option<usize> {
        let position = match self.registry.state(carousel) {
            Some(WidgetState::Carousel { indicators, .. }) => {
                indicators.iter().position(|i| *i == indicator)
            }
            _ => None,
        };
        let Some(index) = position else {
            debug!("indicator is not part of this carousel");
            return None;
        };
        self.carousel_go_to(carousel, index)
    }

    fn step_carousel(
        &mut self,
        carousel: NodeId,
        step: impl FnOnce(CarouselState) -> CarouselState,
    ) -> Option<usize> {
        let Some(Target {
            state: WidgetState::Carousel { slides, .. },
            ..
        }) = self.registry.target_mut(carousel)
        else {
            debug!("carousel step requested for an element that is not a carousel");
            return None;
        };
        *slides = step(*slides);
        let index = slides.index();
        self.render_carousel(carousel);
        trace!(index, "carousel moved");
        Some(index)
    }

    fn render_carousel(&mut self, carousel: NodeId) {
        let Some(WidgetState::Carousel {
            slides,
            items,
            indicators,
        }) = self.registry.state(carousel)
        else {
            return;
        };
        let active = &self.conventions.raw.active_class;
        for (i, item) in items.iter().enumerate() {
            self.doc.set_class(*item, active, i == slides.index());
        }
        for (i, indicator) in indicators.iter().enumerate() {
            let current = i == slides.index();
            self.doc.set_class(*indicator, active, current);
            if current {
                self.doc.set_attr(*indicator, "aria-current", "true");
            } else {
                self.doc.remove_attr(*indicator, "aria-current");
            }
        }
    }
}
