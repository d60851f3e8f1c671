use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

#[test]
fn test_numbers_trim_and_reject() {
	assert_eq!(i32::decode("  42 "), Ok(42));
	assert_eq!(f64::decode("0.05"), Ok(0.05));
	assert!(u8::decode("256").is_err());
	assert_eq!(
		f32::decode("fast"),
		Err(ScalarError::Invalid {
			expected: "f32",
			text: "fast".to_string(),
		})
	);
}

#[test]
fn test_bool_spellings() {
	for text in ["true", "TRUE", "yes", "On", "1"] {
		assert_eq!(bool::decode(text), Ok(true), "{text}");
	}
	for text in ["false", "No", "off", "0"] {
		assert_eq!(bool::decode(text), Ok(false), "{text}");
	}
	assert!(bool::decode("maybe").is_err());
	assert_eq!(true.encode(), "true");
}

#[test]
fn test_string_is_raw() {
	assert_eq!(String::decode(" a, b "), Ok(" a, b ".to_string()));
}

#[test]
fn test_option_reports_unset() {
	assert!(!None::<f64>.is_set());
	assert_eq!(Option::<f64>::decode("1.5"), Ok(Some(1.5)));
	assert_eq!(None::<f64>.encode(), "");
}

#[test]
fn test_color_components() {
	assert_eq!(Color::decode("1,0,0,1"), Ok(Color::RED));
	assert_eq!(Color::RED.encode(), "1,0,0,1");
	assert_eq!(Color::decode("0.5 0.25\t0"), Ok(Color::rgb(0.5, 0.25, 0.0)));
	assert_eq!(Color::decode("1, 0, 0"), Ok(Color::RED));
}

#[test]
fn test_color_bad_arity_is_white() {
	assert_eq!(Color::decode("1,0"), Ok(Color::WHITE));
	assert_eq!(Color::decode(""), Ok(Color::WHITE));
	assert_eq!(Color32::decode("1,2,3,4,5"), Ok(Color32::WHITE));
}

#[test]
fn test_color_bad_component_fails() {
	assert!(Color::decode("1,red,0").is_err());
	assert!(Color32::decode("0,0,300").is_err());
}

#[test]
fn test_color32_opacity() {
	assert_eq!(Color32::decode("10,20,30"), Ok(Color32::new(10, 20, 30, 255)));
	assert_eq!(Color::from(Color32::WHITE), Color::WHITE);
}

#[test]
fn test_vector_arity_fallbacks() {
	assert_eq!(Vector3::decode("1, 2, 3"), Ok(Vector3::new(1.0, 2.0, 3.0)));
	assert_eq!(Vector3::decode("1,2"), Ok(Vector3::ZERO));
	assert_eq!(Vector2::decode("1 2 3"), Ok(Vector2::ZERO));
	assert_eq!(Quaternion::decode("0,0,0"), Ok(Quaternion::IDENTITY));
	assert!(Vector4::decode("1,2,x,4").is_err());
}

#[test]
fn test_curve_key_forms() {
	assert_eq!(CurveKey::decode("0 1"), Ok(CurveKey::new(0.0, 1.0)));
	assert_eq!(
		CurveKey::decode("0.5;2;0.1,0.2"),
		Ok(CurveKey::with_tangents(0.5, 2.0, 0.1, 0.2))
	);
	assert_eq!(
		CurveKey::decode("1 2 3"),
		Err(ScalarError::CurveArity {
			line: "1 2 3".to_string(),
			found: 3,
		})
	);
}

#[test]
fn test_curve_decode_sorts_keys() {
	let curve = Curve::decode("1 10\n\n0 0\n0.5 4 1 1").unwrap();
	let positions: Vec<f32> = curve.keys().iter().map(|k| k.position).collect();
	assert_eq!(positions, [0.0, 0.5, 1.0]);
	assert_eq!(curve.encode(), "0 0\n0.5 4 1 1\n1 10");
}

#[test]
fn test_curve_evaluate() {
	let curve = Curve::new([CurveKey::new(0.0, 0.0), CurveKey::new(1.0, 10.0)]);
	assert_eq!(curve.evaluate(-1.0), 0.0);
	assert_eq!(curve.evaluate(0.5), 5.0);
	assert_eq!(curve.evaluate(2.0), 10.0);
	assert_eq!(Curve::default().evaluate(0.3), 0.0);

	let sloped = Curve::new([
		CurveKey::with_tangents(0.0, 0.0, 1.0, 1.0),
		CurveKey::with_tangents(1.0, 1.0, 1.0, 1.0),
	]);
	assert!((sloped.evaluate(0.25) - 0.25).abs() < 1e-6);
}

#[test]
fn test_curve_nan_positions() {
	let curve = Curve::new([CurveKey::new(0.0, 0.0), CurveKey::new(1.0, 1.0)]);
	assert!(curve.evaluate(f32::NAN).is_nan());

	assert!(matches!(
		CurveKey::decode("NaN 1"),
		Err(ScalarError::Invalid { text, .. }) if text == "NaN"
	));
	assert!(Curve::decode("0 0\ninf 1").is_err());

	let unordered = Curve::new([
		CurveKey::new(1.0, 1.0),
		CurveKey::new(f32::NAN, 5.0),
		CurveKey::new(0.0, 0.0),
	]);
	let positions: Vec<f32> = unordered.keys().iter().map(|k| k.position).collect();
	assert_eq!(&positions[..2], [0.0, 1.0]);
	assert!(positions[2].is_nan());
	assert_eq!(unordered.evaluate(0.5), 0.5);
}

fn finite_f64() -> impl Strategy<Value = f64> {
	-1.0e12_f64..1.0e12
}

fn finite_f32() -> impl Strategy<Value = f32> {
	-1.0e6_f32..1.0e6
}

proptest! {
	#[test]
	fn test_integer_round_trip(value in any::<i64>()) {
		prop_assert_eq!(i64::decode(&value.encode()), Ok(value));
	}

	#[test]
	fn test_float_round_trip(value in finite_f64()) {
		prop_assert_eq!(f64::decode(&value.encode()), Ok(value));
	}

	#[test]
	fn test_bool_round_trip(value in any::<bool>()) {
		prop_assert_eq!(bool::decode(&value.encode()), Ok(value));
	}

	#[test]
	fn test_vector_round_trip(x in finite_f64(), y in finite_f64(), z in finite_f64(), w in finite_f64()) {
		let v2 = Vector2::new(x, y);
		prop_assert_eq!(Vector2::decode(&v2.encode()), Ok(v2));
		let v3 = Vector3::new(x, y, z);
		prop_assert_eq!(Vector3::decode(&v3.encode()), Ok(v3));
		let v4 = Vector4::new(x, y, z, w);
		prop_assert_eq!(Vector4::decode(&v4.encode()), Ok(v4));
		let q = Quaternion::new(x, y, z, w);
		prop_assert_eq!(Quaternion::decode(&q.encode()), Ok(q));
	}

	#[test]
	fn test_color_round_trip(r in finite_f32(), g in finite_f32(), b in finite_f32(), a in finite_f32()) {
		let color = Color::new(r, g, b, a);
		prop_assert_eq!(Color::decode(&color.encode()), Ok(color));
	}

	#[test]
	fn test_color32_round_trip(channels in any::<[u8; 4]>()) {
		let [r, g, b, a] = channels;
		let color = Color32::new(r, g, b, a);
		prop_assert_eq!(Color32::decode(&color.encode()), Ok(color));
	}
}
