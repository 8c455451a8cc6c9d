//! XML utilities for navigating plenary protocol trees.

mod utils;

pub use utils::{
    direct_text, element_children, find_child, find_children, find_descendant,
    find_descendants, get_attribute, get_tag_name, get_text, has_tag,
};
