use rustcoinc_algorithms::{calculate_coincidence, find_coincidences, MatcherKind};
use rustcoinc_core::{
    ChannelEvents, ChannelId, ChannelRole, ChannelSet, CoincidenceConfig, Error, SUM_AMPLITUDE,
};
use ChannelRole::{AntiCoincidence as Anti, Coincidence as Coinc, Ignore};

fn config(roles: [ChannelRole; 4], window: f64) -> CoincidenceConfig {
    CoincidenceConfig::new().with_roles(roles).with_window(window)
}

#[test]
fn test_zero_window_matches_nothing() {
    let channels = ChannelSet::new()
        .with_channel(ChannelId::A, ChannelEvents::new(vec![1.0], vec![1.0]))
        .with_channel(ChannelId::B, ChannelEvents::new(vec![1.0], vec![1.0]));

    let table = calculate_coincidence(&channels, &config([Coinc, Coinc, Ignore, Ignore], 0.0))
        .unwrap();
    assert_eq!(table.num_rows(), 0);
}

fn equal_pairs() -> ChannelSet {
    ChannelSet::new()
        .with_channel(
            ChannelId::A,
            ChannelEvents::new(vec![1.0, 2.0], vec![1.0, 2.0]),
        )
        .with_channel(
            ChannelId::B,
            ChannelEvents::new(vec![1.0, 2.0], vec![3.0, 4.0]),
        )
}

#[test]
fn test_negative_window_matches_nothing() {
    let channels = equal_pairs();
    for roles in [
        [Coinc, Coinc, Ignore, Ignore],
        [Coinc, Coinc, Anti, Ignore],
        [Coinc, Coinc, Anti, Anti],
    ] {
        let table = calculate_coincidence(&channels, &config(roles, -1.0)).unwrap();
        assert_eq!(table.num_rows(), 0, "roles {roles:?}");
    }
}

#[test]
fn test_zero_window_veto_accepts_identical_timestamps() {
    // max - min == 0 passes the spread test and an empty veto never fires
    let table =
        calculate_coincidence(&equal_pairs(), &config([Coinc, Coinc, Anti, Ignore], 0.0)).unwrap();
    assert_eq!(table.num_rows(), 2);
    assert_eq!(table.column("A_time"), Some(&[1.0, 2.0][..]));
    assert_eq!(table.column("B_amplitude"), Some(&[3.0, 4.0][..]));
}

#[test]
fn test_zero_window_veto_at_same_instant() {
    // The veto range [min, min] still contains an event at exactly min
    let channels =
        equal_pairs().with_channel(ChannelId::C, ChannelEvents::new(vec![1.0], vec![0.0]));
    let table =
        calculate_coincidence(&channels, &config([Coinc, Coinc, Anti, Ignore], 0.0)).unwrap();
    assert_eq!(table.num_rows(), 1);
    assert_eq!(table.column("A_time"), Some(&[2.0][..]));
}

#[test]
fn test_window_match_two_channels() {
    let channels = ChannelSet::new()
        .with_channel(
            ChannelId::A,
            ChannelEvents::new(vec![0.0, 5.0], vec![10.0, 20.0]),
        )
        .with_channel(
            ChannelId::B,
            ChannelEvents::new(vec![0.05, 5.2], vec![11.0, 22.0]),
        );

    let table = calculate_coincidence(&channels, &config([Coinc, Coinc, Ignore, Ignore], 0.1))
        .unwrap();
    assert_eq!(table.num_rows(), 1);
    assert_eq!(table.column("A_time"), Some(&[0.0][..]));
    assert_eq!(table.column("B_time"), Some(&[0.05][..]));
    assert_eq!(table.column("A_amplitude"), Some(&[10.0][..]));
    assert_eq!(table.column("B_amplitude"), Some(&[11.0][..]));
    assert_eq!(table.column(SUM_AMPLITUDE), Some(&[21.0][..]));
}

#[test]
fn test_veto_channel_outside_window_accepts_pairs() {
    let channels = ChannelSet::new()
        .with_channel(
            ChannelId::A,
            ChannelEvents::new(vec![0.0, 1.0], vec![1.0, 2.0]),
        )
        .with_channel(
            ChannelId::B,
            ChannelEvents::new(vec![0.02, 1.01], vec![3.0, 4.0]),
        )
        .with_channel(ChannelId::C, ChannelEvents::new(vec![0.5], vec![9.0]));

    let table = calculate_coincidence(&channels, &config([Coinc, Coinc, Anti, Ignore], 0.05))
        .unwrap();
    assert_eq!(table.num_rows(), 2);
    assert_eq!(table.column("A_time"), Some(&[0.0, 1.0][..]));
    assert_eq!(table.column("B_time"), Some(&[0.02, 1.01][..]));
    // Veto channels get no columns and there is no amplitude sum
    assert_eq!(table.column("C_time"), None);
    assert_eq!(table.column(SUM_AMPLITUDE), None);
}

#[test]
fn test_veto_channel_inside_window_rejects() {
    let channels = ChannelSet::new()
        .with_channel(ChannelId::A, ChannelEvents::new(vec![0.0], vec![1.0]))
        .with_channel(ChannelId::B, ChannelEvents::new(vec![0.01], vec![1.0]))
        .with_channel(ChannelId::C, ChannelEvents::new(vec![0.005], vec![1.0]));

    let table = calculate_coincidence(&channels, &config([Coinc, Coinc, Anti, Ignore], 0.05))
        .unwrap();
    assert_eq!(table.num_rows(), 0);
}

#[test]
fn test_single_coincidence_channel_unsupported() {
    let channels = ChannelSet::new();
    let result = calculate_coincidence(&channels, &config([Coinc, Ignore, Ignore, Ignore], 0.1));
    assert_eq!(
        result,
        Err(Error::UnsupportedConfiguration {
            coincidence: 1,
            anti_coincidence: 0,
        })
    );
}

#[test]
fn test_columns_use_original_channel_labels() {
    // B and D are the coincidence channels; A is a veto that never fires
    let channels = ChannelSet::new()
        .with_channel(ChannelId::A, ChannelEvents::new(vec![10.0], vec![0.0]))
        .with_channel(
            ChannelId::B,
            ChannelEvents::new(vec![1.0, 2.0], vec![5.0, 6.0]),
        )
        .with_channel(
            ChannelId::D,
            ChannelEvents::new(vec![1.001, 2.001], vec![7.0, 8.0]),
        );

    let table = calculate_coincidence(&channels, &config([Anti, Coinc, Ignore, Coinc], 0.01))
        .unwrap();
    let names: Vec<&str> = table.column_names().collect();
    assert_eq!(names, vec!["B_time", "B_amplitude", "D_time", "D_amplitude"]);
    assert_eq!(table.column("D_amplitude"), Some(&[7.0, 8.0][..]));
}

#[test]
fn test_three_primaries_one_veto() {
    let channels = ChannelSet::new()
        .with_channel(
            ChannelId::A,
            ChannelEvents::new(vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]),
        )
        .with_channel(
            ChannelId::B,
            ChannelEvents::new(vec![1.01, 2.01, 3.01], vec![1.0, 2.0, 3.0]),
        )
        .with_channel(
            ChannelId::C,
            ChannelEvents::new(vec![1.02, 2.5, 3.02], vec![1.0, 2.0, 3.0]),
        )
        .with_channel(ChannelId::D, ChannelEvents::new(vec![3.0], vec![1.0]));

    let found = find_coincidences(&channels, &config([Coinc, Coinc, Coinc, Anti], 0.05)).unwrap();
    assert_eq!(found.kind, MatcherKind::Coincidence3Anti1);
    // Row at 2.x fails the spread test, row at 3.x is vetoed by D
    assert_eq!(found.matched.len(), 1);
    assert_eq!(
        found.matched.channel(ChannelId::C).unwrap().timestamps,
        vec![1.02]
    );
}

#[test]
fn test_two_primaries_two_vetoes() {
    let channels = ChannelSet::new()
        .with_channel(
            ChannelId::A,
            ChannelEvents::new(vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]),
        )
        .with_channel(
            ChannelId::B,
            ChannelEvents::new(vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]),
        )
        .with_channel(ChannelId::C, ChannelEvents::new(vec![1.01], vec![0.0]))
        .with_channel(ChannelId::D, ChannelEvents::new(vec![3.02], vec![0.0]));

    let found = find_coincidences(&channels, &config([Coinc, Coinc, Anti, Anti], 0.05)).unwrap();
    assert_eq!(found.kind, MatcherKind::Coincidence2Anti2);
    assert_eq!(found.matched.len(), 1);
    assert_eq!(
        found.matched.channel(ChannelId::B).unwrap().amplitudes,
        vec![5.0]
    );
}

#[test]
fn test_four_fold_window_match() {
    let channels = ChannelSet::new()
        .with_channel(
            ChannelId::A,
            ChannelEvents::new(vec![1.0, 2.0], vec![1.0, 1.0]),
        )
        .with_channel(
            ChannelId::B,
            ChannelEvents::new(vec![0.99, 2.0], vec![2.0, 2.0]),
        )
        .with_channel(
            ChannelId::C,
            ChannelEvents::new(vec![1.005, 2.5], vec![3.0, 3.0]),
        )
        .with_channel(
            ChannelId::D,
            ChannelEvents::new(vec![1.0, 2.0], vec![4.0, 4.0]),
        );

    let table = calculate_coincidence(&channels, &config([Coinc; 4], 0.02)).unwrap();
    assert_eq!(table.num_rows(), 1);
    assert_eq!(table.column("C_time"), Some(&[1.005][..]));
    assert_eq!(table.column(SUM_AMPLITUDE), Some(&[10.0][..]));
}
