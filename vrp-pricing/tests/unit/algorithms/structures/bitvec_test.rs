use super::BitVec;

#[test]
fn can_create_empty_vector() {
    let bits = BitVec::new(70);

    assert_eq!(bits.len(), 70);
    assert_eq!(bits.blocks.len(), 2);
    assert_eq!(bits.count_ones(), 0);
    assert!(BitVec::new(0).is_empty());
}

#[test]
fn can_set_and_get_bits_in_different_blocks() {
    let mut bits = BitVec::new(130);
    bits.set(3, true);
    bits.set(64, true);
    bits.set(129, true);
    bits.set(3, false);

    assert_eq!(bits.get(3), Some(false));
    assert_eq!(bits.get(64), Some(true));
    assert_eq!(bits.get(129), Some(true));
    assert_eq!(bits.get(130), None);
    assert!(!bits.contains(200));
    assert_eq!(bits.ones().collect::<Vec<_>>(), vec![64, 129]);
}

#[test]
#[should_panic]
fn can_panic_when_set_out_of_range() {
    let mut bits = BitVec::new(10);
    bits.set(10, true);
}

#[test]
fn can_create_copy_with_bit() {
    let original = BitVec::new(5);
    let copy = original.with(2);

    assert!(!original.contains(2));
    assert!(copy.contains(2));
    assert_ne!(original, copy);
    assert_eq!(copy, BitVec::new(5).with(2));
}

parameterized_test! {can_detect_intersection, (left, right, expected), {
    can_detect_intersection_impl(left, right, expected);
}}

can_detect_intersection! {
    case01_disjoint: (vec![0, 2], vec![1, 3], false),
    case02_common: (vec![0, 2], vec![2, 3], true),
    case03_empty: (vec![], vec![1], false),
    case04_second_block: (vec![1, 100], vec![100], true),
}

fn can_detect_intersection_impl(left: Vec<usize>, right: Vec<usize>, expected: bool) {
    let create = |ones: Vec<usize>| ones.into_iter().fold(BitVec::new(128), |acc, idx| acc.with(idx));

    assert_eq!(create(left).intersects(&create(right)), expected);
}

#[test]
fn can_iterate_and_count_ones() {
    let bits = BitVec::new(10).with(1).with(7);

    assert_eq!(bits.ones().collect::<Vec<_>>(), vec![1, 7]);
    assert_eq!(bits.count_ones(), 2);
}

#[test]
fn can_use_display() {
    let bits = BitVec::new(5).with(0).with(3);

    assert_eq!(bits.to_string(), "[10010]");
}
