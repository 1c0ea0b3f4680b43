//! Diff engine
//!
//! Compares two canonical requests or two result summaries field by
//! field. Rows are driven by fixed, ordered label tables rather than key
//! enumeration, so row order is stable and independent of which fields
//! happen to be present. Equality is plain string equality on the
//! formatted representation, with `-` standing in for missing values.

use std::collections::HashMap;

use lbp_schema::{
    CalculationResponse, CanonicalCalculationRequest, DirectionParameters, DirectionResult,
    IntermodulationBlock, LinkDirection,
};

use crate::rows::{ParameterRow, ResultRow, MISSING};

/// Flat `key -> formatted value` view of a calculation response
pub type ResultSummary = HashMap<String, String>;

/// Ordered parameter rows, one per comparable request field
const PARAMETER_TABLE: &[(&str, &str)] = &[
    ("waveform_strategy", "Waveform strategy"),
    ("transponder_type", "Transponder type"),
    ("satellite_id", "Satellite"),
    ("earth_station_tx_id", "TX earth station"),
    ("earth_station_rx_id", "RX earth station"),
    ("modcod_table_id", "ModCod table"),
    ("uplink_modcod_table_id", "Uplink ModCod table"),
    ("downlink_modcod_table_id", "Downlink ModCod table"),
    ("bandwidth_hz", "Shared bandwidth (Hz)"),
    ("rolloff", "Roll-off"),
    ("sat_longitude_deg", "Satellite longitude (deg E)"),
    ("sat_latitude_deg", "Satellite latitude (deg N)"),
    ("sat_altitude_km", "Satellite altitude (km)"),
    ("computation_datetime", "Computation time"),
    ("uplink.frequency_hz", "Uplink frequency (Hz)"),
    ("uplink.bandwidth_hz", "Uplink bandwidth (Hz)"),
    ("uplink.rain_rate_mm_per_hr", "Uplink rain rate (mm/hr)"),
    ("uplink.temperature_k", "Uplink temperature (K)"),
    ("uplink.pressure_hpa", "Uplink pressure (hPa)"),
    ("uplink.water_vapor_density", "Uplink water vapor (g/m3)"),
    ("uplink.ground_lat_deg", "Uplink ground latitude"),
    ("uplink.ground_lon_deg", "Uplink ground longitude"),
    ("uplink.ground_alt_m", "Uplink ground altitude (m)"),
    ("uplink.interference.adjacent_sat_ci_db", "Uplink adjacent-sat C/I (dB)"),
    ("uplink.interference.cross_polar_ci_db", "Uplink cross-polar C/I (dB)"),
    ("uplink.interference.other_carrier_ci_db", "Uplink other-carrier C/I (dB)"),
    ("uplink.interference.applied", "Uplink interference applied"),
    ("downlink.frequency_hz", "Downlink frequency (Hz)"),
    ("downlink.bandwidth_hz", "Downlink bandwidth (Hz)"),
    ("downlink.rain_rate_mm_per_hr", "Downlink rain rate (mm/hr)"),
    ("downlink.temperature_k", "Downlink temperature (K)"),
    ("downlink.pressure_hpa", "Downlink pressure (hPa)"),
    ("downlink.water_vapor_density", "Downlink water vapor (g/m3)"),
    ("downlink.ground_lat_deg", "Downlink ground latitude"),
    ("downlink.ground_lon_deg", "Downlink ground longitude"),
    ("downlink.ground_alt_m", "Downlink ground altitude (m)"),
    ("downlink.interference.adjacent_sat_ci_db", "Downlink adjacent-sat C/I (dB)"),
    ("downlink.interference.cross_polar_ci_db", "Downlink cross-polar C/I (dB)"),
    ("downlink.interference.other_carrier_ci_db", "Downlink other-carrier C/I (dB)"),
    ("downlink.interference.applied", "Downlink interference applied"),
    ("intermodulation.input_backoff_db", "Intermod input backoff (dB)"),
    ("intermodulation.output_backoff_db", "Intermod output backoff (dB)"),
    ("intermodulation.saturation_power_dbw", "Intermod saturation power (dBW)"),
    ("intermodulation.composite_carriers", "Intermod composite carriers"),
    ("intermodulation.reference_bandwidth_hz", "Intermod reference bandwidth (Hz)"),
    ("intermodulation.applied", "Intermodulation applied"),
];

/// Ordered result rows, one per comparable response value
const RESULT_TABLE: &[(&str, &str)] = &[
    ("uplink.fspl_db", "Uplink FSPL (dB)"),
    ("uplink.rain_loss_db", "Uplink rain loss (dB)"),
    ("uplink.gas_loss_db", "Uplink gas loss (dB)"),
    ("uplink.cloud_loss_db", "Uplink cloud loss (dB)"),
    ("uplink.atm_loss_db", "Uplink atmospheric loss (dB)"),
    ("uplink.antenna_pointing_loss_db", "Uplink pointing loss (dB)"),
    ("uplink.gt_db_per_k", "Uplink G/T (dB/K)"),
    ("uplink.eirp_dbw", "Uplink EIRP (dBW)"),
    ("uplink.cn_db", "Uplink C/N (dB)"),
    ("uplink.cn0_dbhz", "Uplink C/N0 (dBHz)"),
    ("uplink.cni_db", "Uplink C/(N+I) (dB)"),
    ("uplink.c_im_db", "Uplink C/IM (dB)"),
    ("uplink.link_margin_db", "Uplink link margin (dB)"),
    ("uplink.clean_link_margin_db", "Uplink clean margin (dB)"),
    ("uplink.modcod_selected", "Uplink ModCod"),
    ("downlink.fspl_db", "Downlink FSPL (dB)"),
    ("downlink.rain_loss_db", "Downlink rain loss (dB)"),
    ("downlink.gas_loss_db", "Downlink gas loss (dB)"),
    ("downlink.cloud_loss_db", "Downlink cloud loss (dB)"),
    ("downlink.atm_loss_db", "Downlink atmospheric loss (dB)"),
    ("downlink.antenna_pointing_loss_db", "Downlink pointing loss (dB)"),
    ("downlink.gt_db_per_k", "Downlink G/T (dB/K)"),
    ("downlink.eirp_dbw", "Downlink EIRP (dBW)"),
    ("downlink.cn_db", "Downlink C/N (dB)"),
    ("downlink.cn0_dbhz", "Downlink C/N0 (dBHz)"),
    ("downlink.cni_db", "Downlink C/(N+I) (dB)"),
    ("downlink.c_im_db", "Downlink C/IM (dB)"),
    ("downlink.link_margin_db", "Downlink link margin (dB)"),
    ("downlink.clean_link_margin_db", "Downlink clean margin (dB)"),
    ("downlink.modcod_selected", "Downlink ModCod"),
    ("combined.cn_db", "Combined C/N (dB)"),
    ("combined.cn0_dbhz", "Combined C/N0 (dBHz)"),
    ("combined.cni_db", "Combined C/(N+I) (dB)"),
    ("combined.c_im_db", "Combined C/IM (dB)"),
    ("combined.link_margin_db", "Combined link margin (dB)"),
    ("combined.clean_link_margin_db", "Combined clean margin (dB)"),
];

fn fmt_num(value: f64) -> String {
    format!("{value}")
}

fn opt_num(value: Option<f64>) -> Option<String> {
    value.map(fmt_num)
}

fn direction_value(params: &DirectionParameters, key: &str) -> Option<String> {
    match key {
        "frequency_hz" => Some(fmt_num(params.frequency_hz)),
        "bandwidth_hz" => opt_num(params.bandwidth_hz),
        "rain_rate_mm_per_hr" => Some(fmt_num(params.rain_rate_mm_per_hr)),
        "temperature_k" => Some(fmt_num(params.temperature_k)),
        "pressure_hpa" => opt_num(params.pressure_hpa),
        "water_vapor_density" => opt_num(params.water_vapor_density),
        "ground_lat_deg" => Some(fmt_num(params.ground_lat_deg)),
        "ground_lon_deg" => Some(fmt_num(params.ground_lon_deg)),
        "ground_alt_m" => Some(fmt_num(params.ground_alt_m)),
        "interference.adjacent_sat_ci_db" => opt_num(params.interference.adjacent_sat_ci_db),
        "interference.cross_polar_ci_db" => opt_num(params.interference.cross_polar_ci_db),
        "interference.other_carrier_ci_db" => opt_num(params.interference.other_carrier_ci_db),
        "interference.applied" => Some(params.interference.applied.to_string()),
        _ => None,
    }
}

fn intermod_value(block: &IntermodulationBlock, key: &str) -> Option<String> {
    match key {
        "input_backoff_db" => opt_num(block.input_backoff_db),
        "output_backoff_db" => opt_num(block.output_backoff_db),
        "saturation_power_dbw" => opt_num(block.saturation_power_dbw),
        "composite_carriers" => block.composite_carriers.map(|v| v.to_string()),
        "reference_bandwidth_hz" => opt_num(block.reference_bandwidth_hz),
        "applied" => Some(block.applied.to_string()),
        _ => None,
    }
}

fn parameter_value(request: &CanonicalCalculationRequest, key: &str) -> Option<String> {
    for direction in [LinkDirection::Uplink, LinkDirection::Downlink] {
        if let Some(rest) = key
            .strip_prefix(direction.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
        {
            return direction_value(request.runtime.direction(direction), rest);
        }
    }
    if let Some(rest) = key.strip_prefix("intermodulation.") {
        return intermod_value(request.runtime.intermodulation.as_ref()?, rest);
    }

    match key {
        "waveform_strategy" => Some(request.waveform_strategy.as_str().to_string()),
        "transponder_type" => Some(request.transponder_type.as_str().to_string()),
        "satellite_id" => {
            (!request.satellite_id.is_empty()).then(|| request.satellite_id.clone())
        }
        "earth_station_tx_id" => request.earth_station_tx_id.clone(),
        "earth_station_rx_id" => request.earth_station_rx_id.clone(),
        "modcod_table_id" => request.modcod_table_id.clone(),
        "uplink_modcod_table_id" => request.uplink_modcod_table_id.clone(),
        "downlink_modcod_table_id" => request.downlink_modcod_table_id.clone(),
        "bandwidth_hz" => opt_num(request.runtime.bandwidth_hz),
        "rolloff" => opt_num(request.runtime.rolloff),
        "sat_longitude_deg" => opt_num(request.runtime.sat_longitude_deg),
        "sat_latitude_deg" => opt_num(request.runtime.sat_latitude_deg),
        "sat_altitude_km" => opt_num(request.runtime.sat_altitude_km),
        "computation_datetime" => request
            .runtime
            .computation_datetime
            .map(|dt| dt.to_rfc3339()),
        _ => None,
    }
}

/// Compare two canonical requests into ordered, labeled parameter rows
#[must_use]
pub fn diff_parameters(
    a: &CanonicalCalculationRequest,
    b: &CanonicalCalculationRequest,
) -> Vec<ParameterRow> {
    PARAMETER_TABLE
        .iter()
        .map(|&(key, label)| {
            let value_a = parameter_value(a, key).unwrap_or_else(|| MISSING.to_string());
            let value_b = parameter_value(b, key).unwrap_or_else(|| MISSING.to_string());
            let is_different = value_a != value_b;
            ParameterRow {
                key,
                label,
                value_a,
                value_b,
                is_different,
            }
        })
        .collect()
}

/// Signed two-decimal `b - a`, when both sides parse as finite numbers
fn signed_delta(a: &str, b: &str) -> String {
    let parsed_a = a.trim().parse::<f64>().ok().filter(|v| v.is_finite());
    let parsed_b = b.trim().parse::<f64>().ok().filter(|v| v.is_finite());
    match (parsed_a, parsed_b) {
        (Some(a), Some(b)) => {
            let delta = b - a;
            // Collapse -0.0 so equal sides always read "+0.00"
            let delta = if delta == 0.0 { 0.0 } else { delta };
            format!("{delta:+.2}")
        }
        _ => MISSING.to_string(),
    }
}

/// Compare two result summaries into ordered, labeled result rows
///
/// Missing keys format as `-` and participate in equality, so
/// present-vs-absent is reported as a difference with no delta.
#[must_use]
pub fn diff_results(a: &ResultSummary, b: &ResultSummary) -> Vec<ResultRow> {
    RESULT_TABLE
        .iter()
        .map(|&(key, label)| {
            let value_a = a.get(key).cloned().unwrap_or_else(|| MISSING.to_string());
            let value_b = b.get(key).cloned().unwrap_or_else(|| MISSING.to_string());
            let delta = signed_delta(&value_a, &value_b);
            let is_different = value_a != value_b;
            ResultRow {
                key,
                label,
                value_a,
                value_b,
                delta,
                is_different,
            }
        })
        .collect()
}

fn summarize_direction(summary: &mut ResultSummary, prefix: &str, result: &DirectionResult) {
    let mut put_num = |key: &str, value: Option<f64>| {
        if let Some(value) = value {
            summary.insert(format!("{prefix}.{key}"), fmt_num(value));
        }
    };
    put_num("fspl_db", result.fspl_db);
    put_num("rain_loss_db", result.rain_loss_db);
    put_num("gas_loss_db", result.gas_loss_db);
    put_num("cloud_loss_db", result.cloud_loss_db);
    put_num("atm_loss_db", result.atm_loss_db);
    put_num("antenna_pointing_loss_db", result.antenna_pointing_loss_db);
    put_num("gt_db_per_k", result.gt_db_per_k);
    put_num("eirp_dbw", result.eirp_dbw);
    put_num("cn_db", result.cn_db);
    put_num("cn0_dbhz", result.cn0_dbhz);
    put_num("cni_db", result.cni_db);
    put_num("c_im_db", result.c_im_db);
    put_num("link_margin_db", result.link_margin_db);
    put_num("clean_link_margin_db", result.clean_link_margin_db);
    if let Some(modcod) = &result.modcod_selected {
        summary.insert(format!("{prefix}.modcod_selected"), modcod.clone());
    }
}

/// Flatten a calculation response into the summary the result diff consumes
#[must_use]
pub fn summarize_results(response: &CalculationResponse) -> ResultSummary {
    let mut summary = ResultSummary::new();
    summarize_direction(&mut summary, "uplink", &response.results.uplink);
    summarize_direction(&mut summary, "downlink", &response.results.downlink);

    if let Some(combined) = &response.results.combined {
        let mut put_num = |key: &str, value: Option<f64>| {
            if let Some(value) = value {
                summary.insert(format!("combined.{key}"), fmt_num(value));
            }
        };
        put_num("cn_db", combined.cn_db);
        put_num("cn0_dbhz", combined.cn0_dbhz);
        put_num("cni_db", combined.cni_db);
        put_num("c_im_db", combined.c_im_db);
        put_num("link_margin_db", combined.link_margin_db);
        put_num("clean_link_margin_db", combined.clean_link_margin_db);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use lbp_schema::{
        CalculationResults, CombinedResult, InterferenceBlock, RuntimeParameters,
        TransponderType, WaveformStrategy,
    };
    use pretty_assertions::assert_eq;

    fn direction(frequency_hz: f64) -> DirectionParameters {
        DirectionParameters {
            frequency_hz,
            bandwidth_hz: Some(36e6),
            elevation_deg: None,
            rain_rate_mm_per_hr: 10.0,
            temperature_k: 290.0,
            pressure_hpa: None,
            water_vapor_density: None,
            ground_lat_deg: 0.0,
            ground_lon_deg: 0.0,
            ground_alt_m: 0.0,
            interference: InterferenceBlock::default(),
        }
    }

    fn request() -> CanonicalCalculationRequest {
        CanonicalCalculationRequest {
            waveform_strategy: WaveformStrategy::DvbS2x,
            transponder_type: TransponderType::Transparent,
            modcod_table_id: Some("mc-1".to_string()),
            uplink_modcod_table_id: None,
            downlink_modcod_table_id: None,
            satellite_id: "sat-001".to_string(),
            earth_station_tx_id: Some("es-tx".to_string()),
            earth_station_rx_id: None,
            runtime: RuntimeParameters {
                bandwidth_hz: Some(36e6),
                rolloff: Some(0.2),
                sat_longitude_deg: Some(128.0),
                sat_latitude_deg: None,
                sat_altitude_km: None,
                computation_datetime: None,
                uplink: direction(14.25e9),
                downlink: direction(12e9),
                intermodulation: None,
            },
            overrides: None,
        }
    }

    #[test]
    fn identical_requests_diff_to_all_same() {
        let rows = diff_parameters(&request(), &request());
        assert_eq!(rows.len(), PARAMETER_TABLE.len());
        assert!(rows.iter().all(|row| !row.is_different));
    }

    #[test]
    fn row_order_is_stable_and_table_driven() {
        let rows = diff_parameters(&request(), &request());
        let keys: Vec<&str> = rows.iter().map(|row| row.key).collect();
        let expected: Vec<&str> = PARAMETER_TABLE.iter().map(|&(key, _)| key).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn present_vs_absent_is_a_difference() {
        let a = request();
        let mut b = request();
        b.earth_station_tx_id = None;

        let rows = diff_parameters(&a, &b);
        let row = rows.iter().find(|r| r.key == "earth_station_tx_id").unwrap();
        assert_eq!(row.value_a, "es-tx");
        assert_eq!(row.value_b, "-");
        assert!(row.is_different);
    }

    #[test]
    fn changed_value_flags_difference() {
        let a = request();
        let mut b = request();
        b.runtime.downlink.frequency_hz = 11.7e9;

        let rows = diff_parameters(&a, &b);
        let row = rows
            .iter()
            .find(|r| r.key == "downlink.frequency_hz")
            .unwrap();
        assert!(row.is_different);
        assert_eq!(row.value_a, "12000000000");
        assert_eq!(row.value_b, "11700000000");
    }

    #[test]
    fn self_diff_of_full_summary_is_zero_delta_everywhere() {
        let summary: ResultSummary = RESULT_TABLE
            .iter()
            .enumerate()
            .map(|(i, &(key, _))| (key.to_string(), format!("{}.5", i)))
            .collect();

        let rows = diff_results(&summary, &summary);
        assert_eq!(rows.len(), RESULT_TABLE.len());
        for row in rows {
            assert!(!row.is_different);
            assert_eq!(row.delta, "+0.00");
        }
    }

    #[test]
    fn delta_sign_follows_b_minus_a() {
        let a: ResultSummary = [("combined.cn_db".to_string(), "9.5".to_string())].into();
        let b: ResultSummary = [("combined.cn_db".to_string(), "11.0".to_string())].into();

        let rows = diff_results(&a, &b);
        let row = rows.iter().find(|r| r.key == "combined.cn_db").unwrap();
        assert_eq!(row.delta, "+1.50");
        assert!(row.is_different);

        let rows = diff_results(&b, &a);
        let row = rows.iter().find(|r| r.key == "combined.cn_db").unwrap();
        assert_eq!(row.delta, "-1.50");
    }

    #[test]
    fn non_numeric_sides_have_no_delta() {
        let a: ResultSummary =
            [("uplink.modcod_selected".to_string(), "8PSK 3/4".to_string())].into();
        let b: ResultSummary =
            [("uplink.modcod_selected".to_string(), "QPSK 1/2".to_string())].into();

        let rows = diff_results(&a, &b);
        let row = rows
            .iter()
            .find(|r| r.key == "uplink.modcod_selected")
            .unwrap();
        assert_eq!(row.delta, "-");
        assert!(row.is_different);
    }

    #[test]
    fn missing_key_formats_as_placeholder_with_no_delta() {
        let a: ResultSummary = [("combined.cn_db".to_string(), "9.5".to_string())].into();
        let b = ResultSummary::new();

        let rows = diff_results(&a, &b);
        let row = rows.iter().find(|r| r.key == "combined.cn_db").unwrap();
        assert_eq!(row.value_b, "-");
        assert_eq!(row.delta, "-");
        assert!(row.is_different);
    }

    #[test]
    fn summarize_flattens_all_blocks() {
        let response = CalculationResponse {
            schema_version: Some("1.1.0".to_string()),
            results: CalculationResults {
                uplink: DirectionResult {
                    direction: Some("uplink".to_string()),
                    fspl_db: Some(207.3),
                    cn_db: Some(11.2),
                    modcod_selected: Some("8PSK 3/4".to_string()),
                    ..blank_direction()
                },
                downlink: DirectionResult {
                    cn_db: Some(9.8),
                    ..blank_direction()
                },
                combined: Some(CombinedResult {
                    cn_db: Some(8.4),
                    cn0_dbhz: None,
                    cni_db: None,
                    cni0_dbhz: None,
                    c_im_db: None,
                    link_margin_db: Some(2.1),
                    clean_link_margin_db: None,
                    clean_cn_db: None,
                }),
            },
            modcod_selected: None,
            combined_link_margin_db: None,
            combined_cn_db: None,
            combined_cn0_dbhz: None,
        };

        let summary = summarize_results(&response);
        assert_eq!(summary["uplink.fspl_db"], "207.3");
        assert_eq!(summary["uplink.modcod_selected"], "8PSK 3/4");
        assert_eq!(summary["downlink.cn_db"], "9.8");
        assert_eq!(summary["combined.link_margin_db"], "2.1");
        assert!(!summary.contains_key("combined.cn0_dbhz"));
    }

    fn blank_direction() -> DirectionResult {
        DirectionResult {
            direction: None,
            fspl_db: None,
            rain_loss_db: None,
            gas_loss_db: None,
            cloud_loss_db: None,
            atm_loss_db: None,
            antenna_pointing_loss_db: None,
            gt_db_per_k: None,
            cn_db: None,
            cn0_dbhz: None,
            link_margin_db: None,
            clean_link_margin_db: None,
            clean_cn_db: None,
            modcod_selected: None,
            eirp_dbw: None,
            bandwidth_hz: None,
            cni_db: None,
            cni0_dbhz: None,
            c_im_db: None,
            interference_applied: false,
            intermod_applied: false,
            warnings: None,
        }
    }
}
