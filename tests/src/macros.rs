#[macro_export]
macro_rules! assert_eq_unordered {
    ($actual:expr, $expect:expr) => {
        let mut vals = std::collections::HashSet::new();

        for val in $actual {
            assert!(vals.insert(val));
        }

        for val in $expect {
            assert!(vals.remove(val), "`{:#?}` missing", val);
        }

        assert!(vals.is_empty());
    };
}

/// Asserts that `$result` is an error for which `$pred` holds.
#[macro_export]
macro_rules! assert_err {
    ($result:expr, $pred:ident) => {
        match $result {
            Ok(value) => panic!("expected an error, got {:?}", value),
            Err(err) => assert!(err.$pred(), "unexpected error: {err}"),
        }
    };
}
