use crate::cli::BoundariesArgs;
use crate::config::PartialFilterConfig;
use crate::error::Result;
use epifilter::core::models::domain::BoundaryMap;
use epifilter::engine::boundaries::load_boundaries;
use std::fmt::Write as _;
use tracing::info;

pub fn run(args: BoundariesArgs) -> Result<()> {
    let mut partial_config = PartialFilterConfig::load(args.config.as_deref())?;
    partial_config.apply_set_values(&args.set_values)?;
    let domains = partial_config.take_domain_sets()?;

    info!("Summarizing domain boundaries in {:?}", &args.input);
    let map = load_boundaries(&args.input, &domains)?;
    print!("{}", render_table(&map));
    Ok(())
}

fn render_table(map: &BoundaryMap) -> String {
    let cell = |value: Option<i64>| value.map_or_else(|| "-".to_string(), |v| v.to_string());

    let mut ids: Vec<&String> = map.keys().collect();
    ids.sort();

    let mut out = String::new();
    let _ = writeln!(out, "seq_id\tn_term_end\tc_term_start\tlpxtg_pos");
    for id in ids {
        let bounds = &map[id];
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}",
            id,
            cell(bounds.n_term_end),
            cell(bounds.c_term_start),
            cell(bounds.lpxtg_pos)
        );
    }
    out
}
