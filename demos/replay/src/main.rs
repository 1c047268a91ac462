use argh::FromArgs;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use aimpoint::algebra::Point2D;
use aimpoint::pointer::{
    CalibrationSession, PipelineConfig, PointerError, PointerSample, SampleSink, ScreenMapper,
    Tracker, Viewport,
};
use aimpoint::quad::bilinear::CalibrationParams;
use aimpoint::quad::MarkerObservation;

/// Replays recorded marker detections through the pointer pipeline
#[derive(Debug, FromArgs)]
struct Args {
    /// path to a JSON lines file with one frame of four markers per line
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// camera viewport width in pixels
    #[argh(option, default = "1280.0")]
    width: f64,

    /// camera viewport height in pixels
    #[argh(option, default = "720.0")]
    height: f64,

    /// optional JSON pipeline configuration file
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// calibration corners as x0,y0,x1,y1,x2,y2,x3,y3 (TL, TR, BR, BL)
    #[argh(option, from_str_fn(parse_calibration))]
    calibration: Option<[Point2D; 4]>,

    /// screen size as WIDTHxHEIGHT to also report calibrated pixel positions
    #[argh(option, from_str_fn(parse_screen))]
    screen: Option<(f64, f64)>,

    /// device identifier written to each sample
    #[argh(option, default = "String::from(\"replay\")")]
    id: String,

    /// player name written to each sample
    #[argh(option, default = "String::from(\"NoName\")")]
    name: String,
}

fn parse_calibration(value: &str) -> Result<[Point2D; 4], String> {
    let values = value
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| format!("{v}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() != 8 {
        return Err(format!("expected 8 values, got {}", values.len()));
    }

    Ok(std::array::from_fn(|i| {
        Point2D::new(values[2 * i], values[2 * i + 1])
    }))
}

fn parse_screen(value: &str) -> Result<(f64, f64), String> {
    let (w, h) = value
        .split_once('x')
        .ok_or_else(|| "expected WIDTHxHEIGHT".to_string())?;
    let w = w.parse::<f64>().map_err(|e| e.to_string())?;
    let h = h.parse::<f64>().map_err(|e| e.to_string())?;
    Ok((w, h))
}

/// One recorded frame: either a bare array of markers or an object with a fire flag.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Frame {
    Markers([MarkerObservation; 4]),
    Full {
        markers: [MarkerObservation; 4],
        #[serde(default)]
        fire: bool,
    },
}

#[derive(Debug, Serialize)]
struct Output {
    #[serde(flatten)]
    sample: PointerSample,
    #[serde(skip_serializing_if = "Option::is_none")]
    calibrated: Option<Point2D>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pixel: Option<Point2D>,
}

/// Writes each sample as one JSON line, refined and mapped when configured.
struct JsonLinesSink<W: Write> {
    writer: W,
    session: Option<CalibrationSession>,
    mapper: Option<ScreenMapper>,
    params: CalibrationParams,
}

impl<W: Write> SampleSink for JsonLinesSink<W> {
    fn send_sample(&mut self, sample: PointerSample) -> Result<(), PointerError> {
        let calibrated = self
            .session
            .as_ref()
            .map(|s| s.refine(sample.position(), &self.params))
            .transpose()?;
        let pixel = match (calibrated, self.mapper) {
            (Some(pos), Some(mapper)) => mapper.map(pos),
            _ => None,
        };

        serde_json::to_writer(
            &mut self.writer,
            &Output {
                sample,
                calibrated,
                pixel,
            },
        )?;
        writeln!(self.writer)?;
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    let mut sink = JsonLinesSink {
        writer: std::io::stdout().lock(),
        session: args.calibration.map(CalibrationSession::from_corners),
        mapper: args.screen.map(|(w, h)| config.screen_mapper(w, h)),
        params: config.calibration,
    };

    let mut tracker = Tracker::new(args.id, args.name, config.tracker);
    let viewport = Viewport::new(args.width, args.height);

    let reader = BufReader::new(std::fs::File::open(&args.input)?);
    let mut frames = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let (markers, fire) = match serde_json::from_str::<Frame>(&line)? {
            Frame::Markers(markers) => (markers, false),
            Frame::Full { markers, fire } => (markers, fire),
        };
        frames += 1;

        if !tracker.publish(&markers, viewport, fire, &mut sink)? {
            log::info!("line {}: tracking lost", line_no + 1);
        }
    }
    sink.writer.flush()?;

    log::info!("replayed {frames} frames, {} samples", tracker.published());

    Ok(())
}
