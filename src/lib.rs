//! # trellis
//!
//! A retained-mode widget toolkit. The host builds a tree of widgets once,
//! then drives it every frame through [`Ui::update`](ui::Ui::update) and
//! [`Ui::render`](ui::Ui::render).
//!
//! ## Core Systems
//!
//! - **[`tree`]**: Slotmap-backed widget arena: insertion, re-parenting, hit-testing
//! - **[`layout`]**: The `Layouter` contract with row and anchor layouts
//! - **[`widget`]**: Widget trait, deferred-init gate, lifecycle tracking
//! - **[`widgets`]**: Button, Checkbox, Container, List, SelectComboButton, Text
//! - **[`event`]**: Typed event channels, the deferred queue, host input
//! - **[`overlay`]**: Tooltips and drag-and-drop
//! - **[`render`]**: The `Surface` paint target and the in-memory `Canvas`
//! - **[`ui`]**: Frame driver with commands, timers, and windows
//! - **[`testing`]**: Headless `Pilot` and render-to-string helpers
//! - **[`geometry`]**: Offset, Size, Region, Insets primitives

// Foundation
pub mod geometry;

// Core systems
pub mod layout;
pub mod tree;

// Widget system
pub mod widget;
pub mod widgets;

// Events
pub mod event;

// Rendering
pub mod overlay;
pub mod render;

// Frame driver
pub mod testing;
pub mod ui;
