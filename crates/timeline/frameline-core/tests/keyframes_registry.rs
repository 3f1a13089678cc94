use frameline_core::{Frame, Keyframes, PropertyPath, Value};

fn mk_frame(pairs: &[(&str, f64)]) -> Frame {
    let mut f = Frame::new();
    for (name, v) in pairs {
        f.set(*name, *v);
    }
    f
}

fn x_at(k: &Keyframes, time: f64) -> Option<f64> {
    k.get(time).and_then(|f| f.value("x")).and_then(Value::as_f64)
}

#[test]
/// it should keep unique ascending keys with insert-or-replace
fn add_get_has_remove() {
    let mut k = Keyframes::new();
    k.add(2.0, mk_frame(&[("x", 2.0)]));
    k.add(0.0, mk_frame(&[("x", 0.0)]));
    k.add(1.0, mk_frame(&[("x", 1.0)]));
    k.add(2.0, mk_frame(&[("x", 20.0)]));
    assert_eq!(k.times().collect::<Vec<_>>(), vec![0.0, 1.0, 2.0]);
    assert_eq!(x_at(&k, 2.0), Some(20.0));
    assert!(k.has(1.0));
    assert!(k.remove(1.0).is_some());
    assert!(!k.has(1.0));
    assert!(k.remove(1.0).is_none());
}

#[test]
/// it should treat keys that differ only by float noise as the same key
fn keys_are_snapped() {
    let mut k = Keyframes::new();
    k.add(0.1 + 0.2, mk_frame(&[("x", 1.0)]));
    assert!(k.has(0.3));
    k.add(0.3, mk_frame(&[("x", 2.0)]));
    assert_eq!(k.len(), 1);
}

#[test]
/// it should only update duration and names on refresh
fn refresh_and_refresh_frame() {
    let mut k = Keyframes::new();
    k.add(0.0, mk_frame(&[("x", 0.0)]));
    k.add(3.0, mk_frame(&[("y", 1.0)]));
    assert_eq!(k.duration(), 0.0);
    k.refresh();
    assert_eq!(k.duration(), 3.0);
    let names: Vec<String> = k.names().iter().map(ToString::to_string).collect();
    assert_eq!(names, vec!["x", "y"]);

    if let Some(f) = k.get_mut(0.0) {
        f.set("z", 5.0);
    }
    assert!(!k.names().contains(&PropertyPath::from("z")));
    let edited = k.get(0.0).cloned().unwrap();
    k.refresh_frame(&edited);
    assert!(k.names().contains(&PropertyPath::from("z")));
}

#[test]
/// it should shift every key on unshift
fn unshift_shifts_all() {
    let mut k = Keyframes::from_pairs([(0.0, mk_frame(&[("x", 0.0)])), (1.0, mk_frame(&[("x", 1.0)]))]);
    k.unshift(2.0);
    assert_eq!(k.times().collect::<Vec<_>>(), vec![2.0, 3.0]);
}

#[test]
/// it should rescale positive keys and keep key 0 in place
fn rescale_keeps_zero() {
    let mut k = Keyframes::from_pairs([
        (0.0, mk_frame(&[("x", 0.0)])),
        (100.0, mk_frame(&[("x", 1.0)])),
    ]);
    k.rescale(200.0, 100.0);
    assert_eq!(k.times().collect::<Vec<_>>(), vec![0.0, 200.0]);
    assert_eq!(x_at(&k, 200.0), Some(1.0));
    k.rescale(1.0, 0.0);
    assert_eq!(k.times().collect::<Vec<_>>(), vec![0.0, 200.0]);
    k.rescale(0.0, 200.0);
    assert_eq!(k.times().collect::<Vec<_>>(), vec![0.0, 200.0]);
    assert_eq!(x_at(&k, 0.0), Some(0.0));
}

#[test]
/// it should prepend another collection, merging the junction frame
fn prepend_other() {
    let mut k = Keyframes::from_pairs([(0.0, mk_frame(&[("x", 5.0)])), (1.0, mk_frame(&[("x", 6.0)]))]);
    let other = Keyframes::from_pairs([
        (0.0, mk_frame(&[("x", 0.0)])),
        (2.0, mk_frame(&[("x", 1.0), ("y", 1.0)])),
    ]);
    k.prepend(&other);
    k.refresh();
    assert_eq!(k.times().collect::<Vec<_>>(), vec![0.0, 2.0, 3.0]);
    assert_eq!(x_at(&k, 0.0), Some(0.0));
    // our frame wins at the junction, the other's extra leaves are kept
    assert_eq!(x_at(&k, 2.0), Some(5.0));
    assert!(k.get(2.0).is_some_and(|f| f.has("y")));
    assert_eq!(k.duration(), 3.0);
}

#[test]
/// it should append another collection after the last key
fn append_other() {
    let mut k = Keyframes::from_pairs([(0.0, mk_frame(&[("x", 0.0)])), (1.0, mk_frame(&[("x", 1.0)]))]);
    let other = Keyframes::from_pairs([(0.0, mk_frame(&[("y", 0.0)])), (1.0, mk_frame(&[("y", 1.0)]))]);
    k.append(&other);
    k.refresh();
    assert_eq!(k.times().collect::<Vec<_>>(), vec![0.0, 1.0, 2.0]);
    let junction = k.get(1.0).unwrap();
    assert!(junction.has("x") && junction.has("y"));
    assert_eq!(k.duration(), 2.0);
}

#[test]
/// it should deep-copy on clone
fn clone_does_not_alias() {
    let k = Keyframes::from_pairs([(0.0, mk_frame(&[("x", 0.0)]))]);
    let mut copy = k.clone();
    if let Some(f) = copy.get_mut(0.0) {
        f.set("x", 99.0);
    }
    copy.add(1.0, mk_frame(&[("x", 1.0)]));
    assert_eq!(x_at(&k, 0.0), Some(0.0));
    assert_eq!(k.len(), 1);
}
