// End-to-end decoding of candump capture logs
use canaero_decoder::{
    DecodeStatus, Decoder, DecoderConfig, DecodedValue, OutputRecord, Scalar, TimestampFormat,
};
use std::fs::File;
use std::io::{BufReader, Write};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const CAPTURE: &str = "\
(1690000000.000000) can0 154#0A0200003F800000
(1690000000.001000) can0 150#0A0200003F800000
(1690000000.002000) can0 154#0A0700010064
(1690000000.003000) can1 3F4#0B1F0002000000000000F03F
this line is not a frame
(1690000000.004000) can0 154#0A02
(1690000000.005000) can0 4B0#0C0D0000FFFF0001
(1690000000.006000) can0 154#0AFF000012345678
(1690000000.007000) can0 7FF#0D640000CAFEBABE99
(1690000000.008000) can0 154#0A0600
(1690000000.009000) can0 150#0A02000040000000
";

fn write_capture(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn decode_file(config: DecoderConfig) -> (Vec<OutputRecord>, canaero_decoder::PipelineStats) {
    init_logging();
    let capture = write_capture(CAPTURE);
    let reader = BufReader::new(File::open(capture.path()).unwrap());

    let decoder = Decoder::with_config(config);
    let mut records = Vec::new();
    let stats = decoder.process_reader(reader, &mut records).unwrap();
    (records, stats)
}

#[test]
fn decodes_capture_file_in_order() {
    let (records, stats) =
        decode_file(DecoderConfig::new().with_timestamp_format(TimestampFormat::Seconds));

    assert_eq!(stats.lines, 11);
    assert_eq!(stats.records, 8);
    assert_eq!(stats.no_match, 1);
    assert_eq!(stats.too_short, 2);

    let ids: Vec<u32> = records.iter().map(|r| r.can_id).collect();
    assert_eq!(ids, vec![0x154, 0x150, 0x154, 0x3F4, 0x4B0, 0x154, 0x7FF, 0x150]);

    let timestamps: Vec<&str> = records.iter().map(|r| r.timestamp.as_str()).collect();
    assert_eq!(timestamps[0], "1690000000.000000");
    assert_eq!(timestamps[7], "1690000000.009000");

    let rendered: Vec<(String, String)> = records
        .iter()
        .map(|r| (r.status.to_string(), r.value.to_string()))
        .collect();
    assert_eq!(rendered[0], ("FLOAT".into(), "1.0".into()));
    assert_eq!(rendered[1], ("FLOAT".into(), "1.0".into()));
    assert_eq!(rendered[2], ("USHORT".into(), "100".into()));
    assert_eq!(rendered[3], ("DOUBLEL".into(), "1.0".into()));
    assert_eq!(rendered[4], ("USHORT2".into(), "65535,1".into()));
    assert_eq!(rendered[5], ("unknown_0xFF".into(), "12345678".into()));
    assert_eq!(rendered[6], ("UDEF".into(), "CAFEBABE".into()));
    assert_eq!(rendered[7], ("FLOAT".into(), "2.0".into()));

    assert_eq!(records[6].raw, vec![0x0D, 0x64, 0x00, 0x00, 0xCA, 0xFE, 0xBA, 0xBE, 0x99]);
    assert_eq!(records[6].name, "Unknown");
    assert_eq!(records[4].name, "Utc");
}

#[test]
fn header_fields_match_frame_bytes() {
    init_logging();
    let decoder = Decoder::new();

    for line in CAPTURE.lines() {
        let Some(hex_data) = line.split('#').nth(1) else {
            continue;
        };
        let Ok(data) = hex::decode(hex_data) else {
            continue;
        };

        let mut records = Vec::new();
        decoder.process([line], &mut records).unwrap();

        if data.len() < 4 {
            assert!(records.is_empty(), "short frame emitted: {}", line);
            continue;
        }
        assert_eq!(records.len(), 1, "expected one record for {}", line);
        let record = &records[0];
        assert_eq!(record.node_id, data[0]);
        assert_eq!(record.data_type_code, data[1]);
        assert_eq!(record.service_code, data[2]);
        assert_eq!(record.message_code, data[3]);
    }
}

#[test]
fn single_id_filter_emits_only_that_id() {
    let (all, _) = decode_file(DecoderConfig::new());
    let expected = all.iter().filter(|r| r.can_id == 0x154).count();

    let (records, stats) = decode_file(DecoderConfig::new().add_id_filter(0x154));

    assert_eq!(records.len(), expected);
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.can_id == 0x154));
    assert_eq!(stats.filtered, all.len() - expected);
    assert_eq!(stats.records + stats.dropped(), stats.lines);
}

#[test]
fn multi_id_filter() {
    let (records, _) = decode_file(DecoderConfig::new().with_id_filter([0x150, 0x3F4]));
    let ids: Vec<u32> = records.iter().map(|r| r.can_id).collect();
    assert_eq!(ids, vec![0x150, 0x3F4, 0x150]);
}

#[test]
fn raw_mode_tags_every_record() {
    let (records, stats) = decode_file(DecoderConfig::new().with_raw_mode(true));

    assert_eq!(stats.records, 8);
    assert_eq!(stats.fallbacks, 8);
    for record in &records {
        assert_eq!(record.status, DecodeStatus::Raw(record.data_type_code));
        assert_eq!(
            record.value,
            DecodedValue::Hex(hex::encode_upper(&record.raw[4..]))
        );
    }
}

#[test]
fn flaps_position_end_to_end() {
    init_logging();
    let decoder = Decoder::with_config(
        DecoderConfig::new().with_timestamp_format(TimestampFormat::Iso8601),
    );
    let mut records = Vec::new();
    decoder
        .process(["(1690000000.000000) can0 154#0A020000B6F3FC00"], &mut records)
        .unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    let info = decoder.catalog().lookup(0x154);
    assert_eq!(record.name, info.name);
    assert_eq!(record.unit, info.unit);
    assert_eq!(record.status, DecodeStatus::Decoded("FLOAT"));
    assert_eq!(
        record.value,
        DecodedValue::Scalar(Scalar::Float32(f32::from_be_bytes([0xB6, 0xF3, 0xFC, 0x00])))
    );

    let row = record.to_row();
    assert_eq!(row.timestamp, "2023-07-22T04:26:40.000+00:00");
    assert_eq!(row.can_id, "0x154 (340)");
    assert_eq!(row.name, "Flaps position");
    assert_eq!(row.data_type_code, "0x02");
    assert_eq!(row.raw_data_hex, "0A020000B6F3FC00");
}

#[test]
fn six_byte_flaps_frame_falls_back_to_hex() {
    // Header takes B6 F3 as service/message code, leaving two payload bytes
    init_logging();
    let decoder = Decoder::new();
    let mut records = Vec::new();
    decoder
        .process(["(1690000000.000000) can0 154#0A02B6F3FC00"], &mut records)
        .unwrap();

    let record = &records[0];
    assert_eq!(record.service_code, 0xB6);
    assert_eq!(record.message_code, 0xF3);
    assert_eq!(record.status.to_string(), "decode_error_FLOAT");
    assert_eq!(record.value.to_string(), "FC00");
    assert_eq!(record.name, "Flaps position");
}

#[test]
fn iso_timestamps_keep_capture_milliseconds() {
    let (records, _) = decode_file(DecoderConfig::new());

    let timestamps: Vec<&str> = records.iter().map(|r| r.timestamp.as_str()).collect();
    assert_eq!(timestamps[0], "2023-07-22T04:26:40.000+00:00");
    assert_eq!(timestamps[1], "2023-07-22T04:26:40.001+00:00");
    assert_eq!(timestamps[2], "2023-07-22T04:26:40.002+00:00");
    assert_eq!(timestamps[3], "2023-07-22T04:26:40.003+00:00");
    assert_eq!(timestamps[timestamps.len() - 1], "2023-07-22T04:26:40.009+00:00");
}

#[test]
fn corrupted_line_does_not_stop_the_run() {
    init_logging();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"(1690000000.000000) can0 154#0A0200003F800000\n").unwrap();
    file.write_all(b"(1690000000.001000) can0 \xFF\xFE#0A02\n").unwrap();
    file.write_all(b"(1690000000.002000) can0 150#0A02000040000000\n").unwrap();
    file.flush().unwrap();

    let decoder = Decoder::new();
    let outcomes: Vec<_> = decoder
        .decode_lines(
            canaero_decoder::formats::CandumpParser::lines(BufReader::new(
                File::open(file.path()).unwrap(),
            ))
            .map(|line| line.unwrap()),
        )
        .collect();

    assert_eq!(outcomes.len(), 3);
    assert!(matches!(outcomes[1], canaero_decoder::LineOutcome::NoMatch));
    match &outcomes[2] {
        canaero_decoder::LineOutcome::Record(record) => assert_eq!(record.can_id, 0x150),
        other => panic!("expected a record, got {:?}", other),
    }
}
