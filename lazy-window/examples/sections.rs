// Example: a sectioned list (headers + rows) resolved through the interval index, with a
// bucketed key window and a per-theme content cache.
use lazy_window::{
    IntervalIndex, KeyIndexMap, MaterializedContentCache, NearestRangeOptions, NearestRangeState,
};

#[derive(Debug)]
enum Section {
    Header(&'static str),
    Rows { section: &'static str },
}

fn main() -> Result<(), lazy_window::WindowError> {
    let mut intervals = IntervalIndex::new();
    for name in ["alpha", "beta", "gamma", "delta"] {
        intervals.append(1, Section::Header(name));
        intervals.append(250, Section::Rows { section: name });
    }
    println!("total_items={}", intervals.total_size());

    let (interval, local) = intervals.resolve(600)?;
    println!("item 600 -> {:?} (local index {local})", interval.value);

    let mut window = NearestRangeState::new(0, NearestRangeOptions::default());
    for first_visible in [0, 12, 29, 30, 61, 700] {
        if window.update(first_visible) {
            println!("first_visible={first_visible} window={:?}", window.range());
        }
    }

    let keys = KeyIndexMap::build(&intervals, window.range(), |interval, index| {
        match interval.value {
            Section::Header(name) => format!("header:{name}"),
            Section::Rows { section } => format!("{section}:{}", index - interval.start_index),
        }
    })?;
    println!(
        "keys={} first={:?} index_of(gamma:100)={:?}",
        keys.len(),
        keys.key_at(window.range().start),
        keys.index_of(&"gamma:100".to_string())
    );

    let mut cache = MaterializedContentCache::new();
    for theme in ["light", "light", "dark"] {
        cache.invalidate_if_environment_changed(theme);
        cache.begin_pass();
        for index in 700..705 {
            let key = keys.key_at(index).cloned().unwrap_or_default();
            cache.get_or_materialize(index, key, |index, key| format!("[{theme}] #{index} {key}"));
        }
        println!(
            "theme={theme} cached={} materializations={}",
            cache.len(),
            cache.materialization_count()
        );
    }
    Ok(())
}
