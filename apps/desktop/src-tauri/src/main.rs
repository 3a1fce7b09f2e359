//! # SignCraft Desktop Application Entry Point
//!
//! Thin binary wrapper; the real setup lives in lib.rs so it stays
//! testable and usable from the Tauri mobile entry points.

// Prevents an additional console window on Windows in release
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

fn main() {
    signcraft_desktop_lib::run();
}
