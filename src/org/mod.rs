//! Organization tree and membership logic

pub mod primary;
pub mod tree;

pub use primary::{
    ensure_primary_department, handle_dept_removal, handle_node_selection,
    handle_primary_dept_setting, validate_primary_invariant, DeptRemoval, NodeSelection,
    SelectionUpdate,
};
pub use tree::{
    build_corp_name_map, build_tree, convert_to_tree_data, filter_tree, find_node, get_all_keys,
    ConvertContext, FilteredTree,
};
