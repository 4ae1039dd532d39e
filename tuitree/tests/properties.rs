use proptest::prelude::*;

use tuitree::layout::{size_tracks, update_layout};
use tuitree::widgets::{Label, Panel};
use tuitree::{
    Color, ColorPoint, ControlTree, Layout, Orientation, Rect, Size, Thickness, TrackSize,
};

fn track() -> impl Strategy<Value = TrackSize> {
    prop_oneof![
        (-10i32..200).prop_map(TrackSize::Absolute),
        (-10i32..300).prop_map(TrackSize::Percent),
        Just(TrackSize::AutoSize),
    ]
}

fn color() -> impl Strategy<Value = Option<Color>> {
    prop_oneof![
        Just(None),
        Just(Some(Color::Red)),
        Just(Some(Color::Blue)),
        (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Some(Color::rgb(r, g, b))),
    ]
}

proptest! {
    #[test]
    fn reduce_never_goes_negative(
        x in -1000i32..1000,
        y in -1000i32..1000,
        w in 0i32..1000,
        h in 0i32..1000,
        sides in proptest::array::uniform4(0i32..i32::MAX),
    ) {
        let rect = Rect::new(x, y, w, h).unwrap();
        let reduced = rect.reduce(Thickness::new(sides[0], sides[1], sides[2], sides[3]));
        prop_assert!(reduced.width() >= 0);
        prop_assert!(reduced.height() >= 0);
    }

    #[test]
    fn reduce_by_nothing_is_identity(
        x in -1000i32..1000,
        y in -1000i32..1000,
        w in 0i32..1000,
        h in 0i32..1000,
    ) {
        let rect = Rect::new(x, y, w, h).unwrap();
        prop_assert_eq!(rect.reduce(Thickness::EMPTY), rect);
    }

    #[test]
    fn tracks_fit_the_extent(
        tracks in proptest::collection::vec(track(), 1..8),
        extent in 0i32..500,
    ) {
        let sizes = size_tracks(&tracks, extent);
        prop_assert_eq!(sizes.len(), tracks.len());
        prop_assert!(sizes.iter().all(|s| *s >= 0));
        prop_assert!(sizes.iter().sum::<i32>() <= extent);
    }

    #[test]
    fn color_fallback_is_component_wise(
        own_bg in color(),
        own_fg in color(),
        parent_bg in color(),
        parent_fg in color(),
    ) {
        let resolved = ColorPoint::new(own_bg, own_fg).or(ColorPoint::new(parent_bg, parent_fg));
        prop_assert_eq!(resolved.background, own_bg.or(parent_bg));
        prop_assert_eq!(resolved.foreground, own_fg.or(parent_fg));
    }

    #[test]
    fn layout_twice_is_stable(
        texts in proptest::collection::vec("[a-z]{0,12}", 0..6),
        width in 0i32..40,
        height in 0i32..12,
        padding in 0i32..3,
    ) {
        let mut tree = ControlTree::new();
        let root = tree.create_container(Panel::new(), Layout::Stack(Orientation::Vertical));
        tree.set_root(root).unwrap();
        tree.set_padding(root, Thickness::uniform(padding)).unwrap();
        let children: Vec<_> = texts
            .iter()
            .map(|text| {
                let id = tree.create(Label::new(text.as_str()));
                tree.add_content(root, id).unwrap();
                id
            })
            .collect();
        let screen = Size::new(width, height).unwrap();

        update_layout(&mut tree, root, screen).unwrap();
        let first: Vec<_> = children
            .iter()
            .map(|id| {
                let node = tree.node(*id).unwrap();
                (node.bounds(), node.desired_size())
            })
            .collect();
        update_layout(&mut tree, root, screen).unwrap();
        let second: Vec<_> = children
            .iter()
            .map(|id| {
                let node = tree.node(*id).unwrap();
                (node.bounds(), node.desired_size())
            })
            .collect();

        prop_assert_eq!(&first, &second);
        if width >= 2 * padding && height >= 2 * padding {
            let screen_rect = Rect::from_size(screen);
            for (bounds, _) in &second {
                prop_assert!(screen_rect.contains_rect(bounds));
            }
        }
    }
}
