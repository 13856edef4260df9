/// Hero carousel state
///
/// A fixed-cadence slideshow: the app's 5 s timer calls `advance`, the dots
/// call `select`. Manual selection moves the index but leaves the timer
/// alone, so the next automatic advance still lands on the old cadence.

use std::time::{Duration, Instant};

use super::animation::{progress, CubicBezier};
use crate::route::Route;

/// Time between automatic advances
pub const SLIDE_INTERVAL: Duration = Duration::from_secs(5);
/// Enter/exit transition length
pub const TRANSITION: Duration = Duration::from_millis(500);
/// How long the loading indicator covers the carousel after mount
pub const CONTENT_DELAY: Duration = Duration::from_secs(1);
/// Horizontal travel of a slide during its transition
const TRAVEL: f32 = 100.0;

/// Landing banner text, top to bottom
pub const BANNER_HEADLINE: [&str; 2] = ["Welcome to", "Golden Extreme"];
pub const BANNER_TAGLINE: &str =
    "Your premier destination for premium tires, wheels, and automotive excellence";
/// Headline lines, tagline and the action row
pub const BANNER_BLOCKS: usize = 4;

/// A single hero slide
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub id: u32,
    /// Image path relative to the asset directory
    pub image: &'static str,
    pub alt: &'static str,
    /// Headline; '\n' separates lines
    pub title: &'static str,
    pub subtitle: &'static str,
    pub cta: &'static str,
    pub link: Route,
}

impl Slide {
    pub fn title_lines(&self) -> impl Iterator<Item = &'static str> {
        self.title.split('\n')
    }
}

/// The storefront's landing slides
pub fn default_slides() -> Vec<Slide> {
    vec![
        Slide {
            id: 1,
            image: "new/ADM_4614.webp",
            alt: "Premium Performance Tires",
            title: "ENGINEERED FOR\nPERFORMANCE",
            subtitle: "Discover our range of high-performance tires for ultimate road grip and control",
            cta: "Shop Now",
            link: Route::Catalog(super::data::Category::ALL),
        },
        Slide {
            id: 2,
            image: "new/ADM_4501.webp",
            alt: "All-Season Tires",
            title: "ALL-SEASON\nRELIABILITY",
            subtitle: "Drive confidently in any weather condition with our versatile tire collection",
            cta: "Browse Tires",
            link: Route::Catalog(super::data::Category::TYRES),
        },
        Slide {
            id: 3,
            image: "new/ADM_4620.webp",
            alt: "Off-Road Tires",
            title: "CONQUER ANY\nTERRAIN",
            subtitle: "Built tough for your off-road adventures with superior traction and durability",
            cta: "Explore Wheels",
            link: Route::Catalog(super::data::Category::WHEELS),
        },
    ]
}

/// Direction of the last slide change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// Where a slide should be drawn during a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideFrame {
    pub index: usize,
    pub opacity: f32,
    /// Horizontal offset; positive moves right
    pub offset_x: f32,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    previous: usize,
    started: Instant,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    slides: Vec<Slide>,
    current: usize,
    direction: Direction,
    transition: Option<Transition>,
    mounted_at: Instant,
}

impl Carousel {
    pub fn new(slides: Vec<Slide>, now: Instant) -> Self {
        Self {
            slides,
            current: 0,
            direction: Direction::Forward,
            transition: None,
            mounted_at: now,
        }
    }

    /// Timer tick: move forward one slide, wrapping at the end
    pub fn advance(&mut self, now: Instant) {
        if self.slides.len() < 2 {
            return;
        }
        let next = (self.current + 1) % self.slides.len();
        self.change_to(next, Direction::Forward, now);
    }

    /// Jump to `index` from the dot navigation
    ///
    /// Out-of-range indexes and the current slide are ignored.
    pub fn select(&mut self, index: usize, now: Instant) {
        if index >= self.slides.len() || index == self.current {
            return;
        }
        let direction = if index > self.current {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.change_to(index, direction, now);
    }

    fn change_to(&mut self, index: usize, direction: Direction, now: Instant) {
        self.transition = Some(Transition {
            previous: self.current,
            started: now,
        });
        self.current = index;
        self.direction = direction;
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.current)
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// False during the initial loading delay
    pub fn content_ready(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.mounted_at) >= CONTENT_DELAY
    }

    /// Whether a transition is still running at `now`
    pub fn animating(&self, now: Instant) -> bool {
        self.transition
            .map(|t| now.saturating_duration_since(t.started) < TRANSITION)
            .unwrap_or(false)
    }

    /// Slides to draw at `now`: the exiting one (if any) first, then the current one
    pub fn frames(&self, now: Instant) -> Vec<SlideFrame> {
        if self.slides.is_empty() {
            return Vec::new();
        }

        let Some(transition) = self.transition.filter(|_| self.animating(now)) else {
            return vec![SlideFrame {
                index: self.current,
                opacity: 1.0,
                offset_x: 0.0,
            }];
        };

        let t = CubicBezier::EXPO_OUT.apply(progress(transition.started, now, TRANSITION));
        let sign = self.direction.sign();
        vec![
            SlideFrame {
                index: transition.previous,
                opacity: 1.0 - t,
                offset_x: -sign * TRAVEL * t,
            },
            SlideFrame {
                index: self.current,
                opacity: t,
                offset_x: sign * TRAVEL * (1.0 - t),
            },
        ]
    }
}
