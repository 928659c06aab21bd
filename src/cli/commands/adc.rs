//! ADC command implementation

use crate::adc::{simulate_adc_output, AdcCapture, AdcConfig};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::AdcArgs;
use crate::emit::{patch_file, write_csv_file};

pub fn run_adc(args: AdcArgs, level: LogLevel) -> Result<(), String> {
    let adc = AdcConfig::new(args.data_width, args.buffer_size)
        .map_err(|e| format!("Invalid ADC settings: {e}"))?;
    log(
        level,
        LogLevel::Normal,
        &format!(
            "ADC: DATA_WIDTH={} BUFFER_SIZE={} ADDR_WIDTH={}",
            adc.data_width,
            adc.buffer_size,
            adc.addr_width()
        ),
    );

    let readout = adc.readout_patch();
    for path in &args.readout {
        let replaced = patch_file(path, &readout)
            .map_err(|e| format!("Failed to patch {}: {e}", path.display()))?;
        log(
            level,
            LogLevel::Normal,
            &format!("Patched {} ({replaced} declarations)", path.display()),
        );
    }

    let buffer = adc.buffer_patch();
    for path in &args.buffer {
        let replaced = patch_file(path, &buffer)
            .map_err(|e| format!("Failed to patch {}: {e}", path.display()))?;
        log(
            level,
            LogLevel::Normal,
            &format!("Patched {} ({replaced} declarations)", path.display()),
        );
    }

    if let Some(path) = &args.simulate {
        let capture = AdcCapture {
            num_samples: args.samples,
            ..AdcCapture::default()
        };
        let codes = simulate_adc_output(adc.data_width, &capture)
            .map_err(|e| format!("Simulation failed: {e}"))?;
        write_csv_file(path, &codes).map_err(|e| format!("Failed to write CSV: {e}"))?;
        log(
            level,
            LogLevel::Normal,
            &format!("Wrote {} simulated codes to {}", codes.len(), path.display()),
        );
    }

    Ok(())
}
