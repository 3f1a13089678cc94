use frameline_core::{
    interpolate, Composite, Easing, Endpoint, Frame, Keyframes, TimelineOptions, TimelineResolver,
    Value,
};
use frameline_test_fixtures::timelines;

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn mk_frame(pairs: &[(&str, Value)]) -> Frame {
    let mut f = Frame::new();
    for (name, v) in pairs {
        f.set(*name, v.clone());
    }
    f
}

fn mk_resolver(keys: Vec<(f64, Frame)>) -> TimelineResolver {
    TimelineResolver::new(Keyframes::from_pairs(keys), TimelineOptions::default()).unwrap()
}

fn num_at(r: &TimelineResolver, t: f64, name: &str) -> f64 {
    r.frame_at(t)
        .value(name)
        .and_then(Value::as_f64)
        .unwrap_or(f64::NAN)
}

#[test]
/// it should blend numbers linearly halfway between two keys
fn opacity_halfway() {
    let r = mk_resolver(vec![
        (0.0, mk_frame(&[("opacity", Value::num(0.0))])),
        (1.0, mk_frame(&[("opacity", Value::num(1.0))])),
    ]);
    assert_eq!(r.snapshot(0.5, None).get("opacity"), Some(Value::num(0.5)));
}

#[test]
/// it should step discrete values exactly at the later key
fn display_steps_at_key() {
    let r = TimelineResolver::from_json(&timelines::json("display-toggle").unwrap()).unwrap();
    assert_eq!(r.snapshot(0.999, None).get("display"), Some(Value::text("none")));
    assert_eq!(r.snapshot(1.0, None).get("display"), Some(Value::text("block")));
    approx(num_at(&r, 0.25, "opacity"), 0.25, 1e-12);
}

#[test]
/// it should reproduce keyed values exactly, whatever the easing
fn keys_are_exact_under_easing() {
    let r = mk_resolver(vec![
        (0.0, mk_frame(&[("x", Value::num(0.0))])),
        (1.0, mk_frame(&[("x", Value::num(10.0))])),
        (2.0, mk_frame(&[("x", Value::num(0.0))])),
    ]);
    for easing in [Easing::EaseInOut, Easing::CubicBezier(0.1, 1.5, 0.9, -0.5)] {
        let f = r.snapshot(1.0, Some(&easing));
        assert_eq!(f.get("x"), Some(Value::num(10.0)));
    }
    let eased = r.snapshot(0.25, Some(&Easing::EaseIn)).get("x").and_then(|v| v.as_f64());
    assert!(eased.is_some_and(|x| x < 2.5));
}

#[test]
/// it should clamp outside the keyed range without failing
fn clamps_outside_range() {
    let r = mk_resolver(vec![
        (1.0, mk_frame(&[("x", Value::num(1.0))])),
        (2.0, mk_frame(&[("x", Value::num(2.0))])),
    ]);
    assert_eq!(num_at(&r, -5.0, "x"), 1.0);
    assert_eq!(num_at(&r, 0.0, "x"), 1.0);
    assert_eq!(num_at(&r, 50.0, "x"), 2.0);
}

#[test]
/// it should return structurally equal frames for repeated queries
fn snapshot_is_idempotent() {
    let r = mk_resolver(vec![
        (0.0, mk_frame(&[("x", Value::num(0.0)), ("d", Value::text("a"))])),
        (1.0, mk_frame(&[("x", Value::num(3.0)), ("d", Value::text("b"))])),
    ]);
    assert_eq!(r.snapshot(0.3, None), r.snapshot(0.3, None));
}

#[test]
/// it should hold single-sided values and omit properties nobody defines
fn single_sided_and_missing() {
    let r = mk_resolver(vec![
        (0.0, mk_frame(&[("x", Value::num(0.0)), ("y", Value::num(7.0))])),
        (1.0, mk_frame(&[("x", Value::num(10.0)), ("z", Value::num(3.0))])),
    ]);
    let f = r.snapshot(0.5, None);
    assert_eq!(f.get("y"), Some(Value::num(7.0)));
    assert_eq!(f.get("z"), Some(Value::num(3.0)));
    assert!(!f.has("w"));
}

#[test]
/// it should look past intermediate keys that do not define a property
fn walks_to_defining_keys() {
    let r = mk_resolver(vec![
        (0.0, mk_frame(&[("x", Value::num(0.0))])),
        (1.0, mk_frame(&[("y", Value::num(1.0))])),
        (2.0, mk_frame(&[("x", Value::num(10.0))])),
    ]);
    assert_eq!(num_at(&r, 1.0, "x"), 5.0);
    assert_eq!(num_at(&r, 1.5, "x"), 7.5);
}

#[test]
/// it should hold the previous value when units or shapes disagree
fn mismatches_hold_previous() {
    let r = mk_resolver(vec![
        (
            0.0,
            mk_frame(&[
                ("w", Value::with_unit(10.0, "px")),
                ("c", Composite::function("rgb", ",", vec![Value::num(0.0)]).into()),
            ]),
        ),
        (
            1.0,
            mk_frame(&[
                ("w", Value::with_unit(50.0, "%")),
                ("c", Composite::function("hsl", ",", vec![Value::num(1.0)]).into()),
            ]),
        ),
    ]);
    let f = r.snapshot(0.5, None);
    assert_eq!(f.get("w"), Some(Value::with_unit(10.0, "px")));
    assert_eq!(f.get("c").map(|v| v.to_string()), Some("rgb(0)".to_string()));
    assert_eq!(r.snapshot(1.0, None).get("w"), Some(Value::with_unit(50.0, "%")));
}

#[test]
/// it should blend composite components independently
fn composite_components_blend() {
    let r = mk_resolver(vec![
        (
            0.0,
            mk_frame(&[(
                "margin",
                Composite::list(vec![Value::with_unit(0.0, "px"), Value::text("auto")]).into(),
            )]),
        ),
        (
            1.0,
            mk_frame(&[(
                "margin",
                Composite::list(vec![
                    Value::with_unit(10.0, "px"),
                    Value::text("inherit"),
                    Value::with_unit(4.0, "px"),
                ])
                .into(),
            )]),
        ),
    ]);
    let f = r.snapshot(0.5, None);
    assert_eq!(f.to_property_text(), "margin: 5px inherit 4px;");
}

#[test]
/// it should resolve grouped properties into one shorthand
fn group_shorthand_resolves() {
    let r = TimelineResolver::from_json(&timelines::json("transform-group").unwrap()).unwrap();
    assert_eq!(
        r.frame_at(1.0).to_property_text(),
        "transform: translate(10px) rotate(45deg);"
    );
}

#[test]
/// it should take the easing from the held timing-function channel
fn timing_channel_overrides_easing() {
    let r = TimelineResolver::from_json(&timelines::json("eased-steps").unwrap()).unwrap();
    assert_eq!(r.frame_at(0.25).get("left"), Some(Value::with_unit(0.0, "px")));
    assert_eq!(r.frame_at(0.5).get("left"), Some(Value::with_unit(50.0, "px")));
    assert_eq!(r.frame_at(1.5).get("left"), Some(Value::with_unit(150.0, "px")));
    assert_eq!(
        r.frame_at(0.25).get("animation-timing-function"),
        Some(Value::text("steps(2, end)"))
    );
    // an explicit easing still wins
    assert_eq!(
        r.snapshot(0.25, Some(&Easing::Linear)).get("left"),
        Some(Value::with_unit(25.0, "px"))
    );
}

#[test]
/// it should return a lone endpoint untouched and nothing without endpoints
fn interpolate_edges() {
    let v = Value::with_unit(3.0, "em");
    assert_eq!(
        interpolate(None, Some(Endpoint::new(1.0, &v)), 0.0, &Easing::Ease),
        Some(v.clone())
    );
    assert_eq!(interpolate(None, None, 0.0, &Easing::Ease), None);
    let a = Value::text("a");
    let b = Value::text("b");
    let (ea, eb) = (Endpoint::new(0.0, &a), Endpoint::new(1.0, &b));
    assert_eq!(interpolate(Some(ea), Some(eb), 0.99, &Easing::Linear), Some(a.clone()));
    assert_eq!(interpolate(Some(ea), Some(eb), 1.0, &Easing::Linear), Some(b.clone()));
}
