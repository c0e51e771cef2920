//! Semantic color palette for terminal output.
//!
//! Uses owo-colors for zero-allocation terminal coloring.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Trait extension to apply semantic styles.
pub trait SemanticStyle: Display + Sized {
    /// Apply success styling (green bold).
    fn success(&self) -> String {
        if super::no_color() {
            self.to_string()
        } else {
            self.green().bold().to_string()
        }
    }

    /// Apply error styling (red bold).
    fn error(&self) -> String {
        if super::no_color() {
            self.to_string()
        } else {
            self.red().bold().to_string()
        }
    }

    /// Apply warning styling (yellow).
    fn warning(&self) -> String {
        if super::no_color() {
            self.to_string()
        } else {
            self.yellow().to_string()
        }
    }

    /// Apply info styling (cyan).
    fn info(&self) -> String {
        if super::no_color() {
            self.to_string()
        } else {
            self.cyan().to_string()
        }
    }

    /// Apply muted styling (dimmed).
    fn muted(&self) -> String {
        if super::no_color() {
            self.to_string()
        } else {
            self.dimmed().to_string()
        }
    }

    /// Apply header styling (bold).
    fn header(&self) -> String {
        if super::no_color() {
            self.to_string()
        } else {
            self.bold().to_string()
        }
    }
}

impl<T: Display> SemanticStyle for T {}
