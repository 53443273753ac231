//! Utility helpers used accross the library

#[cfg(test)]
pub(crate) mod tests {
    #[macro_export]
    macro_rules! assert_approx_eq {
        ( $v0:expr, $v1: expr ) => {{
            assert!(
                (($v0 - $v1) as f64).abs() < $crate::EPSILON,
                "{} != {}",
                $v0,
                $v1
            );
        }};
        ( $v0:expr, $v1: expr, $e: expr ) => {{
            assert!((($v0 - $v1) as f64).abs() < $e, "{} != {}", $v0, $v1);
        }};
    }
}
