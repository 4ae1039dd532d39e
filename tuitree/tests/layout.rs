use tuitree::layout::{arrange, measure, update_layout};
use tuitree::widgets::{Frame, Label, Panel};
use tuitree::{
    ControlId, ControlTree, Dock, GridCell, GridDefinition, HorizontalAlignment, Layout,
    Orientation, Point, Rect, Size, Thickness, TrackSize, VerticalAlignment,
};

fn rect(x: i32, y: i32, w: i32, h: i32) -> Rect {
    Rect::new(x, y, w, h).unwrap()
}

fn size(w: i32, h: i32) -> Size {
    Size::new(w, h).unwrap()
}

fn bounds(tree: &ControlTree, id: ControlId) -> Rect {
    tree.node(id).unwrap().bounds()
}

fn container(tree: &mut ControlTree, layout: Layout) -> ControlId {
    let id = tree.create_container(Panel::new(), layout);
    tree.set_root(id).unwrap();
    id
}

fn label(tree: &mut ControlTree, parent: ControlId, text: &str) -> ControlId {
    let id = tree.create(Label::new(text));
    tree.add_content(parent, id).unwrap();
    id
}

// ============================================================================
// Measure
// ============================================================================

#[test]
fn test_margin_wraps_auto_sized_content() {
    let mut tree = ControlTree::new();
    let root = container(&mut tree, Layout::Single);
    tree.set_margin(root, Thickness::uniform(1)).unwrap();
    label(&mut tree, root, "Hi");

    let desired = measure(&mut tree, root, size(20, 5)).unwrap();

    assert_eq!(desired, size(4, 3));
    assert!(tree.node(root).unwrap().is_measure_valid());
}

#[test]
fn test_desired_size_is_clamped_to_available() {
    let mut tree = ControlTree::new();
    let root = container(&mut tree, Layout::Single);
    tree.set_padding(root, Thickness::uniform(2)).unwrap();
    label(&mut tree, root, "a rather long caption");

    let desired = measure(&mut tree, root, size(8, 3)).unwrap();

    assert_eq!(desired, size(8, 3));
}

#[test]
fn test_explicit_size_overrides_content() {
    let mut tree = ControlTree::new();
    let root = container(&mut tree, Layout::Single);
    tree.set_width(root, Some(6)).unwrap();
    tree.set_height(root, Some(2)).unwrap();
    tree.set_padding(root, Thickness::uniform(1)).unwrap();
    label(&mut tree, root, "Hi");

    let desired = measure(&mut tree, root, size(20, 10)).unwrap();

    assert_eq!(desired, size(8, 4));
}

#[test]
fn test_non_auto_sized_control_takes_available_space() {
    let mut tree = ControlTree::new();
    let root = container(&mut tree, Layout::Single);
    let child = label(&mut tree, root, "Hi");
    tree.set_horizontal_alignment(child, HorizontalAlignment::Left).unwrap();
    tree.set_vertical_alignment(child, VerticalAlignment::Top).unwrap();

    update_layout(&mut tree, root, size(10, 4)).unwrap();
    assert_eq!(bounds(&tree, child), rect(0, 0, 2, 1));

    tree.set_auto_size(child, false).unwrap();
    update_layout(&mut tree, root, size(10, 4)).unwrap();
    assert_eq!(bounds(&tree, child), rect(0, 0, 10, 4));
}

// ============================================================================
// Arrange
// ============================================================================

#[test]
fn test_arrange_is_idempotent() {
    let mut tree = ControlTree::new();
    let root = container(&mut tree, Layout::Stack(Orientation::Vertical));
    tree.set_padding(root, Thickness::symmetric(2, 1)).unwrap();
    let a = label(&mut tree, root, "first");
    let b = label(&mut tree, root, "second");

    update_layout(&mut tree, root, size(30, 8)).unwrap();
    let first = (bounds(&tree, a), bounds(&tree, b));
    let desired = tree.node(root).unwrap().desired_size();

    arrange(&mut tree, root, rect(0, 0, 30, 8), true).unwrap();
    assert_eq!((bounds(&tree, a), bounds(&tree, b)), first);
    assert_eq!(tree.node(root).unwrap().desired_size(), desired);
}

#[test]
fn test_arrange_invalidates_visual() {
    let mut tree = ControlTree::new();
    let root = container(&mut tree, Layout::Single);
    let child = label(&mut tree, root, "x");

    update_layout(&mut tree, root, size(5, 1)).unwrap();

    assert!(!tree.node(child).unwrap().is_visual_valid());
    assert!(tree.node(child).unwrap().is_measure_valid());
}

#[test]
fn test_margin_is_peeled_from_final_rect() {
    let mut tree = ControlTree::new();
    let root = container(&mut tree, Layout::Single);
    tree.set_margin(root, Thickness::new(1, 2, 3, 0)).unwrap();

    update_layout(&mut tree, root, size(10, 6)).unwrap();

    assert_eq!(bounds(&tree, root), rect(1, 2, 6, 4));
}

// ============================================================================
// Stack
// ============================================================================

#[test]
fn test_vertical_stack_places_children_in_order() {
    let mut tree = ControlTree::new();
    let root = container(&mut tree, Layout::Stack(Orientation::Vertical));
    let a = label(&mut tree, root, "abc");
    let b = label(&mut tree, root, "de");
    tree.set_horizontal_alignment(b, HorizontalAlignment::Center).unwrap();

    update_layout(&mut tree, root, size(10, 5)).unwrap();

    assert_eq!(tree.node(root).unwrap().desired_size(), size(3, 2));
    assert_eq!(bounds(&tree, a), rect(0, 0, 10, 1));
    assert_eq!(bounds(&tree, b), rect(4, 1, 2, 1));
}

#[test]
fn test_horizontal_stack_clamps_to_remaining_space() {
    let mut tree = ControlTree::new();
    let root = container(&mut tree, Layout::Stack(Orientation::Horizontal));
    let a = label(&mut tree, root, "abcd");
    let b = label(&mut tree, root, "efgh");

    update_layout(&mut tree, root, size(5, 3)).unwrap();

    assert_eq!(bounds(&tree, a), rect(0, 0, 4, 3));
    assert_eq!(bounds(&tree, b), rect(4, 0, 1, 3));
}

// ============================================================================
// Dock
// ============================================================================

#[test]
fn test_dock_fills_remainder_with_last_child() {
    let mut tree = ControlTree::new();
    let root = container(
        &mut tree,
        Layout::Dock {
            last_child_fill: true,
        },
    );
    let title = label(&mut tree, root, "title");
    tree.set_dock(title, Dock::Top).unwrap();
    let nav = label(&mut tree, root, "nav");
    tree.set_dock(nav, Dock::Left).unwrap();
    let body = label(&mut tree, root, "body");

    update_layout(&mut tree, root, size(20, 10)).unwrap();

    assert_eq!(tree.node(root).unwrap().desired_size(), size(7, 2));
    assert_eq!(bounds(&tree, title), rect(0, 0, 20, 1));
    assert_eq!(bounds(&tree, nav), rect(0, 1, 3, 9));
    assert_eq!(bounds(&tree, body), rect(3, 1, 17, 9));
}

#[test]
fn test_dock_right_and_bottom_take_far_edges() {
    let mut tree = ControlTree::new();
    let root = container(
        &mut tree,
        Layout::Dock {
            last_child_fill: false,
        },
    );
    let status = label(&mut tree, root, "ok");
    tree.set_dock(status, Dock::Bottom).unwrap();
    let side = label(&mut tree, root, "side");
    tree.set_dock(side, Dock::Right).unwrap();

    update_layout(&mut tree, root, size(12, 6)).unwrap();

    assert_eq!(bounds(&tree, status), rect(0, 5, 12, 1));
    assert_eq!(bounds(&tree, side), rect(8, 0, 4, 5));
}

// ============================================================================
// Grid
// ============================================================================

#[test]
fn test_grid_places_children_in_cells() {
    let mut tree = ControlTree::new();
    let def = GridDefinition::new()
        .columns([TrackSize::Absolute(4), TrackSize::AutoSize])
        .rows([TrackSize::Percent(50), TrackSize::Percent(50)]);
    let root = container(&mut tree, Layout::Grid(def));
    let cell = label(&mut tree, root, "x");
    tree.set_grid_cell(cell, GridCell::new(1, 1)).unwrap();
    let spanning = label(&mut tree, root, "y");
    tree.set_grid_cell(spanning, GridCell::new(0, 0).span(2, 2)).unwrap();

    update_layout(&mut tree, root, size(10, 4)).unwrap();

    assert_eq!(bounds(&tree, cell), rect(4, 2, 6, 2));
    assert_eq!(bounds(&tree, spanning), rect(0, 0, 10, 4));
}

#[test]
fn test_grid_lines_take_one_cell() {
    let mut tree = ControlTree::new();
    let def = GridDefinition::new()
        .columns([TrackSize::Absolute(4), TrackSize::AutoSize])
        .rows([TrackSize::AutoSize, TrackSize::AutoSize])
        .with_lines();
    let root = container(&mut tree, Layout::Grid(def));
    let cell = label(&mut tree, root, "x");
    tree.set_grid_cell(cell, GridCell::new(1, 1)).unwrap();

    update_layout(&mut tree, root, size(11, 5)).unwrap();

    assert_eq!(bounds(&tree, cell), rect(6, 3, 4, 1));
}

// ============================================================================
// Canvas
// ============================================================================

#[test]
fn test_canvas_places_children_at_position() {
    let mut tree = ControlTree::new();
    let root = container(&mut tree, Layout::Canvas);
    tree.set_auto_size(root, false).unwrap();
    let window = Frame::new("win").create(&mut tree).unwrap();
    tree.add_content(root, window).unwrap();
    tree.set_width(window, Some(10)).unwrap();
    tree.set_height(window, Some(3)).unwrap();
    tree.set_position(window, Point::new(5, 2)).unwrap();

    update_layout(&mut tree, root, size(40, 12)).unwrap();

    assert_eq!(bounds(&tree, root), rect(0, 0, 40, 12));
    assert_eq!(tree.node(root).unwrap().desired_size(), size(40, 12));
    assert_eq!(bounds(&tree, window), rect(5, 2, 12, 5));
}

#[test]
fn test_canvas_children_keep_their_margin_area() {
    let mut tree = ControlTree::new();
    let root = container(&mut tree, Layout::Canvas);
    let child = label(&mut tree, root, "ab");
    tree.set_margin(child, Thickness::uniform(1)).unwrap();
    tree.set_position(child, Point::new(3, 3)).unwrap();

    update_layout(&mut tree, root, size(20, 10)).unwrap();

    assert_eq!(bounds(&tree, child), rect(3, 3, 4, 3));
}
