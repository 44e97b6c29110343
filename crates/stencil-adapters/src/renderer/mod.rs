//! Template engine adapters.

mod minijinja;

pub use self::minijinja::MiniJinjaTemplateSet;
