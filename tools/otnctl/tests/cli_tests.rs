//! Command handler tests against the in-memory provider

#![allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable

use common::OtnConfig;
use errors::OtnError;
use otn_rtdb::{DbIndex, Entity, MemoryProvider};
use otnctl::alarm::AlarmCommands;
use otnctl::chassis::ChassisCommands;
use otnctl::slot::SlotCommands;
use otnctl::{CliContext, ShowCommands};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const PLATFORM: &str = "x86_64-obx1100e";

struct Fixture {
    _dir: TempDir,
    provider: Arc<MemoryProvider>,
    ctx: CliContext,
}

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let platform_dir = format!("device/{PLATFORM}");
    write(
        dir.path(),
        &format!("{platform_dir}/chassis_cli_capability.json"),
        r#"{"max_slot_id": 4, "slot": [{"id": 1}, {"id": 2}, {"id": 3}, {"id": 4}]}"#,
    );
    write(
        dir.path(),
        &format!("{platform_dir}/alarm_profile.json"),
        r#"{"LOS": {"SA": "SA", "Type": "Communications"},
            "TEMP_HIGH": {"SA": "NSA", "Type": "Environment"}}"#,
    );
    write(
        dir.path(),
        &format!("{platform_dir}/linecards/E120C/cli_capability.json"),
        r#"{"board_mode_list": ["OTU4", "100GE"]}"#,
    );
    write(dir.path(), "upgradecfg", r#"{"chassis": {"ver": "R2.1.0"}}"#);

    let provider = Arc::new(MemoryProvider::new());
    provider
        .database(Entity::Chassis, DbIndex::Config)
        .set_field("DEVICE_METADATA", "localhost", "platform", PLATFORM);

    let config = OtnConfig {
        device_dir: dir.path().join("device"),
        upgrade_config: dir.path().join("upgradecfg"),
        utc_timestamps: true,
        ..Default::default()
    };
    let ctx = CliContext::new(config, provider.clone());
    Fixture {
        _dir: dir,
        provider,
        ctx,
    }
}

async fn run(fixture: &Fixture, cmd: ShowCommands) -> anyhow::Result<String> {
    let mut out = Vec::new();
    otnctl::show::handle_command(cmd, &fixture.ctx, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

fn seed_alarm(fixture: &Fixture, entity: Entity, key: &str, type_id: &str, created: &str) {
    fixture.provider.database(entity, DbIndex::State).insert_record(
        "CURALARM",
        key,
        [
            ("id", key),
            ("time-created", created),
            ("resource", "PORT-1-3-L1"),
            ("severity", "CRITICAL"),
            ("type-id", type_id),
            ("text", "signal lost"),
        ],
    );
}

#[tokio::test]
async fn test_show_chassis_info() {
    let fixture = fixture();
    fixture
        .provider
        .database(Entity::Chassis, DbIndex::State)
        .insert_record("CHASSIS", "CHASSIS-1", [("part-no", "OBX1100E-AC"), ("serial-no", "SN0042")]);

    let output = run(
        &fixture,
        ShowCommands::Chassis {
            command: ChassisCommands::Info,
        },
    )
    .await
    .unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], format!("{:<45}: {}", "Platform", PLATFORM));
    assert_eq!(lines[1], format!("{:<45}: OBX1100E-AC", "Part Number"));
    assert_eq!(lines[2], format!("{:<45}: SN0042", "Serial Number"));
    assert_eq!(lines[3], format!("{:<45}: R2.1.0", "Software Version"));
    assert!(output.ends_with("\n\n"));
}

#[tokio::test]
async fn test_show_slot_info() {
    let fixture = fixture();
    fixture
        .provider
        .database(Entity::Slot(3), DbIndex::State)
        .insert_record(
            "LINECARD",
            "LINECARD-1-3",
            [
                ("empty", "false"),
                ("linecard-type", "e120c"),
                ("slot-status", "READY"),
                ("board-mode", "OTU4"),
                ("software-version", "1.2.3"),
            ],
        );

    let output = run(
        &fixture,
        ShowCommands::Slot {
            slot: 3,
            command: SlotCommands::Info,
        },
    )
    .await
    .unwrap();

    assert!(output.contains(&format!("{:<45}: yes\n", "Present")));
    assert!(output.contains(&format!("{:<45}: yes\n", "Ready")));
    assert!(output.contains(&format!("{:<45}: no\n", "Type Mismatch")));
    assert!(output.contains(&format!("{:<45}: OTU4\n", "Board Mode")));
    assert!(output.contains(&format!("{:<45}: OTU4, 100GE\n", "Supported Board Modes")));
}

#[tokio::test]
async fn test_slot_out_of_range() {
    let fixture = fixture();
    let err = run(
        &fixture,
        ShowCommands::Slot {
            slot: 9,
            command: SlotCommands::Info,
        },
    )
    .await
    .unwrap_err();

    let otn = err.downcast_ref::<OtnError>().unwrap();
    assert!(matches!(otn, OtnError::InvalidSlot { slot: 9, .. }));
}

#[tokio::test]
async fn test_system_alarm_current() {
    let fixture = fixture();
    seed_alarm(&fixture, Entity::Chassis, "A1", "LOS", "1000000000");
    seed_alarm(&fixture, Entity::Chassis, "A2", "TEMP_HIGH", "2000000000");
    seed_alarm(&fixture, Entity::Chassis, "A3", "FAN_FAIL", "3000000000");

    let output = run(
        &fixture,
        ShowCommands::Alarm {
            command: AlarmCommands::Current,
        },
    )
    .await
    .unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "System Current Alarm Total num: 3");
    assert_eq!(lines[1], "Warning: invalid alarm type FAN_FAIL");
    assert!(lines[2].starts_with("  id  time-created"));
    assert!(lines[4].starts_with("   1  1970-01-01 00:00:02.000"));
    assert!(lines[4].contains("Environment"));
    assert!(lines[5].starts_with("   2  1970-01-01 00:00:01.000"));
    assert_eq!(lines.len(), 7);
}

#[tokio::test]
async fn test_slot_alarm_history() {
    let fixture = fixture();
    let history = fixture.provider.database(Entity::Slot(2), DbIndex::History);
    history.insert_record(
        "HISALARM",
        "1",
        [
            ("id", "PORT-1-2-L1#LOS"),
            ("time-created", "1000000000"),
            ("time-cleared", "1500000000"),
            ("resource", "PORT-1-2-L1"),
            ("severity", "CRITICAL"),
            ("text", "signal lost"),
        ],
    );
    history.insert_record(
        "HISEVENT",
        "E1",
        [
            ("id", "E1"),
            ("time-created", "1200000000"),
            ("resource", "SLOT-2"),
            ("severity", "NOT_ALARMED"),
            ("type-id", "TEMP_HIGH"),
            ("text", "card inserted"),
        ],
    );

    let output = run(
        &fixture,
        ShowCommands::Slot {
            slot: 2,
            command: SlotCommands::Alarm {
                command: AlarmCommands::History,
            },
        },
    )
    .await
    .unwrap();

    assert!(output.starts_with("Slot 2 History Alarm Total num: 1\n"));
    assert!(output.contains("1970-01-01 00:00:01.000  1970-01-01 00:00:01.500  PORT-1-2-L1"));
    assert!(output.contains("\nSlot 2 History Event Total num: 1\n"));
    assert!(output.contains("card inserted"));
}

#[tokio::test]
async fn test_chassis_alarm_current_empty() {
    let fixture = fixture();
    let output = run(
        &fixture,
        ShowCommands::Chassis {
            command: ChassisCommands::Alarm {
                command: AlarmCommands::Current,
            },
        },
    )
    .await
    .unwrap();
    assert_eq!(output, "System Current Alarm Total num: 0\n\n");
}
