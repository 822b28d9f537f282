use magworld_core::{hline, rect, vline, Offset, Shape, WorldError};

#[test]
fn rect_is_a_hollow_outline() {
    let shape = Shape::rect(5, 5).expect("5x5 rect");

    assert_eq!(shape.len(), 16);
    for x in 0..5 {
        for y in 0..5 {
            let border = x == 0 || y == 0 || x == 4 || y == 4;
            assert_eq!(shape.contains(Offset::new(x, y)), border, "cell ({x}, {y})");
        }
    }
}

#[test]
fn thin_rects_collapse_shared_edges() {
    assert_eq!(Shape::rect(1, 50).expect("column").len(), 50);
    assert_eq!(Shape::rect(3, 1).expect("row").len(), 3);
    assert_eq!(Shape::rect(2, 2).expect("square").len(), 4);
    // The raw helper keeps duplicates; the shape is a set.
    assert_eq!(rect(1, 1).len(), 2);
    assert_eq!(Shape::rect(1, 1).expect("dot").len(), 1);
}

#[test]
fn lines_run_from_their_start_cell() {
    assert_eq!(
        hline(2, 7, 3),
        vec![Offset::new(2, 7), Offset::new(3, 7), Offset::new(4, 7)]
    );
    assert_eq!(vline(-1, 0, 2), vec![Offset::new(-1, 0), Offset::new(-1, 1)]);
    assert!(hline(0, 0, 0).is_empty());
}

#[test]
fn builder_unions_primitives() {
    let shape = Shape::builder()
        .hline(0, 0, 3)
        .hline(1, 0, 3)
        .vline(0, 0, 2)
        .cells([(10, 10)])
        .build()
        .expect("non-empty union");

    assert_eq!(shape.len(), 6);
    assert!(shape.contains(Offset::new(3, 0)));
    assert!(shape.contains(Offset::new(0, 1)));
    assert!(shape.contains(Offset::new(10, 10)));

    let bounds = shape.bounds();
    assert_eq!(bounds.min, Offset::new(0, 0));
    assert_eq!(bounds.max, Offset::new(10, 10));
    assert_eq!(bounds.width(), 11);
}

#[test]
fn rect_at_offsets_the_outline() {
    let shape = Shape::builder().rect_at(3, 4, 3, 3).build().expect("rect");
    assert_eq!(shape.len(), 8);
    assert!(shape.contains(Offset::new(3, 4)));
    assert!(shape.contains(Offset::new(5, 6)));
    assert!(!shape.contains(Offset::new(4, 5)));
}

#[test]
fn union_merges_cells_and_bounds() {
    let a = Shape::new([(0, 0), (1, 0)]).expect("a");
    let b = Shape::new([(1, 0), (-2, 3)]).expect("b");
    let u = a.union(&b);

    assert_eq!(u.len(), 3);
    assert_eq!(u.bounds().min, Offset::new(-2, 0));
    assert_eq!(u.bounds().max, Offset::new(1, 3));
}

#[test]
fn empty_shapes_are_rejected() {
    assert_eq!(Shape::new(Vec::<Offset>::new()), Err(WorldError::EmptyShape));
    assert_eq!(Shape::rect(0, 0), Err(WorldError::EmptyShape));
    assert_eq!(
        Shape::builder().hline(0, 0, 0).vline(0, 0, -3).build(),
        Err(WorldError::EmptyShape)
    );
}
