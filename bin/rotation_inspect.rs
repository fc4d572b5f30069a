use apex_rotations::io::{DisplayConfig, decode_chain, decode_mapping, parse_number_list};
use apex_rotations::rotation::{
    Axis, AxisAngle, AxisMapping, EulerAngles, InputValidator, Quaternion, Representation,
    RotationMatrix, RotationResult, RotationSource, Validation,
};
use apex_rotations::{ApexError, ApexResult, init_logger_with_level};
use clap::{ArgGroup, Parser};
use serde::Serialize;
use tracing::{Level, debug, info};

#[derive(Parser)]
#[command(name = "rotation_inspect")]
#[command(about = "Convert a rotation between chain, mapping, quaternion, Euler, matrix and axis-angle forms")]
#[command(group(
    ArgGroup::new("source")
        .args(["chain", "mapping", "quaternion", "euler", "axis_angle", "matrix"])
        .multiple(false)
))]
struct Args {
    /// Chain of elemental rotations, e.g. "x.90_y.-45" (malformed segments are skipped)
    #[arg(long, allow_hyphen_values = true)]
    chain: Option<String>,

    /// Signed axis mapping in x,y,z order, e.g. "-y.z.-x"
    #[arg(long, allow_hyphen_values = true)]
    mapping: Option<String>,

    /// Quaternion components "x,y,z,w"
    #[arg(long, allow_hyphen_values = true)]
    quaternion: Option<String>,

    /// Euler angles in degrees "roll,pitch,yaw"
    #[arg(long, allow_hyphen_values = true)]
    euler: Option<String>,

    /// Axis and angle in degrees "ax,ay,az,deg"
    #[arg(long, allow_hyphen_values = true)]
    axis_angle: Option<String>,

    /// Row-major matrix "m00,m01,m02,m10,m11,m12,m20,m21,m22"
    #[arg(long, allow_hyphen_values = true)]
    matrix: Option<String>,

    /// 90 degree turns applied to the mapping, e.g. "x+" or "z-" (repeatable)
    #[arg(long = "turn", value_name = "AXIS±")]
    turns: Vec<String>,

    /// Apply the offered repair to invalid quaternion or matrix input
    #[arg(long)]
    repair: bool,

    /// Digits after the decimal point in the text output
    #[arg(long, default_value = "4")]
    precision: usize,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Report {
    source: RotationSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation: Option<Validation>,
    repaired: bool,
    result: RotationResult,
}

fn parse_turn(turn: &str) -> ApexResult<(Axis, bool)> {
    let turn = turn.trim();
    let (label, positive) = if let Some(label) = turn.strip_suffix('+') {
        (label, true)
    } else if let Some(label) = turn.strip_suffix('-') {
        (label, false)
    } else {
        (turn, true)
    };
    let axis = label.parse::<Axis>()?;
    Ok((axis, positive))
}

/// Validate raw input and apply the repair if requested.
///
/// Returns the representation to resolve, the validation outcome and whether a
/// repair was applied.
fn check_raw(
    validator: &InputValidator,
    representation: Representation,
    allow_repair: bool,
) -> ApexResult<(Representation, Option<Validation>, bool)> {
    let validation = match representation {
        Representation::Quaternion(q) => validator.validate_quaternion(&q)?,
        Representation::Matrix(m) => validator.validate_matrix(&m)?,
        Representation::Euler(_) | Representation::AxisAngle(_) => {
            representation.check_finite()?;
            return Ok((representation, None, false));
        }
    };

    let Validation::Invalid(issue) = validation else {
        return Ok((representation, Some(validation), false));
    };

    if !allow_repair || !issue.is_recoverable() {
        return Err(ApexError::from(issue));
    }

    let repaired = match representation {
        Representation::Quaternion(q) => validator.repair_quaternion(&q)?.map(Representation::from),
        Representation::Matrix(m) => validator.repair_matrix(&m)?.map(Representation::from),
        other => Some(other),
    }
    .ok_or(ApexError::from(issue))?;

    info!("Applied repair: {}", validation);
    Ok((repaired, Some(validation), true))
}

fn build_source(
    args: &Args,
    validator: &InputValidator,
) -> ApexResult<(RotationSource, Option<Validation>, bool)> {
    if !args.turns.is_empty() && has_non_mapping_source(args) {
        return Err(ApexError::InvalidInput(
            "--turn only applies to axis mappings".to_string(),
        ));
    }

    if let Some(chain) = &args.chain {
        let chain = decode_chain(chain);
        debug!("Decoded chain with {} steps", chain.len());
        return Ok((RotationSource::Chain(chain.into_steps()), None, false));
    }

    let raw = if let Some(text) = &args.quaternion {
        let v = parse_number_list(text, 4, "quaternion")?;
        Some(Representation::Quaternion(Quaternion::new(v[0], v[1], v[2], v[3])))
    } else if let Some(text) = &args.euler {
        let v = parse_number_list(text, 3, "euler")?;
        Some(Representation::Euler(EulerAngles::new(v[0], v[1], v[2])))
    } else if let Some(text) = &args.axis_angle {
        let v = parse_number_list(text, 4, "axis_angle")?;
        Some(Representation::AxisAngle(AxisAngle::new(v[0], v[1], v[2], v[3])))
    } else if let Some(text) = &args.matrix {
        let v = parse_number_list(text, 9, "matrix")?;
        Some(Representation::Matrix(RotationMatrix::from_rows([
            [v[0], v[1], v[2]],
            [v[3], v[4], v[5]],
            [v[6], v[7], v[8]],
        ])))
    } else {
        None
    };

    if let Some(representation) = raw {
        let (representation, validation, repaired) =
            check_raw(validator, representation, args.repair)?;
        return Ok((RotationSource::Raw(representation), validation, repaired));
    }

    // Mapping, starting from identity when only turns are given
    let mut mapping = match &args.mapping {
        Some(text) => decode_mapping(text)?,
        None => AxisMapping::identity(),
    };
    for turn in &args.turns {
        let (axis, positive) = parse_turn(turn)?;
        mapping = mapping.apply_ninety_degree_step(axis, positive);
    }
    Ok((RotationSource::Mapping(mapping), None, false))
}

fn has_non_mapping_source(args: &Args) -> bool {
    args.chain.is_some()
        || args.quaternion.is_some()
        || args.euler.is_some()
        || args.axis_angle.is_some()
        || args.matrix.is_some()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    init_logger_with_level(level)?;

    let validator = InputValidator::new();
    let (source, validation, repaired) = build_source(&args, &validator)?;
    let result = source.resolve()?;

    if args.json {
        let report = Report {
            source,
            validation,
            repaired,
            result,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let display = DisplayConfig::new().with_precision(args.precision);
    println!("=== ROTATION INSPECT ===");
    println!("source:     {}", source.kind());
    if let Some(validation) = validation {
        let suffix = if repaired { " (repaired)" } else { "" };
        println!("validation: {validation}{suffix}");
    }
    println!("{}", display.format_result(&result));

    Ok(())
}
