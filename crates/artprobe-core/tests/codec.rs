use std::net::Ipv4Addr;

use artprobe_core::{
    ArtCommand, ArtIpProg, ArtIpProgReply, ArtPacket, ArtPoll, ArtPollReply, DecodeError, OpCode,
    layout, peek_opcode, swap_bytes16,
};

fn poll_reply_fixture() -> Vec<u8> {
    let mut buf = vec![0u8; ArtPollReply::WIRE_LEN];
    buf[..8].copy_from_slice(b"Art-Net\0");
    buf[layout::OPCODE.range()].copy_from_slice(&swap_bytes16(0x2100).to_be_bytes());
    buf[layout::poll_reply::IP_ADDRESS.range()].copy_from_slice(&[10, 0, 0, 42]);
    buf[layout::poll_reply::PORT.range()].copy_from_slice(&[0x36, 0x19]);
    buf[layout::poll_reply::VERSION_INFO.range()].copy_from_slice(&[0x01, 0x02]);
    buf[layout::poll_reply::OEM.range()].copy_from_slice(&[0x04, 0x30]);
    buf[layout::poll_reply::ESTA_MAN.range()].copy_from_slice(&[0xf0, 0x7f]);
    let name = layout::poll_reply::PORT_NAME.offset;
    buf[name..name + 5].copy_from_slice(b"Node1");
    let long = layout::poll_reply::LONG_NAME.offset;
    buf[long..long + 14].copy_from_slice(b"Node One Rev 2");
    let report = layout::poll_reply::NODE_REPORT.offset;
    buf[report..report + 15].copy_from_slice(b"#0001 [0042] OK");
    buf[layout::poll_reply::NUM_PORTS.range()].copy_from_slice(&[0x00, 0x02]);
    buf[layout::poll_reply::PORT_TYPES.range()].copy_from_slice(&[0x80, 0x80, 0x00, 0x00]);
    buf[layout::poll_reply::GOOD_OUTPUT.range()].copy_from_slice(&[0x80, 0x00, 0x00, 0x00]);
    buf[layout::poll_reply::ACN_PRIORITY.offset] = 100;
    buf[layout::poll_reply::STYLE.offset] = 0x00;
    buf[layout::poll_reply::MAC.range()].copy_from_slice(&[0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e]);
    buf[layout::poll_reply::BIND_IP.range()].copy_from_slice(&[10, 0, 0, 42]);
    buf[layout::poll_reply::BIND_INDEX.offset] = 1;
    buf[layout::poll_reply::DEFAULT_UID.range()]
        .copy_from_slice(&[0x7f, 0xf0, 0x00, 0x00, 0x00, 0x05]);
    buf[layout::poll_reply::REFRESH_RATE.range()].copy_from_slice(&[0x00, 0x2c]);
    buf
}

#[test]
fn opcode_bytes_are_swapped_for_every_kind() {
    let reply = ArtPollReply::decode(&poll_reply_fixture()).unwrap();
    let encoded = [
        (OpCode::Poll, ArtPoll::new().encode()),
        (OpCode::IpProg, ArtIpProg::new().encode()),
        (OpCode::Command, ArtCommand::new("SWOFF").unwrap().encode()),
        (OpCode::PollReply, reply.encode()),
        (
            OpCode::IpProgReply,
            ArtIpProgReply {
                ip_address: Ipv4Addr::new(2, 0, 0, 1),
                subnet_mask: Ipv4Addr::new(255, 0, 0, 0),
                port: 6454,
                status: 0,
                gateway: Ipv4Addr::UNSPECIFIED,
                ..ArtIpProgReply::default()
            }
            .encode(),
        ),
    ];
    for (opcode, bytes) in encoded {
        let [hi, lo] = opcode.value().to_be_bytes();
        assert_eq!(&bytes[8..10], &[lo, hi], "{opcode:?}");
        assert_eq!(&bytes[..8], b"Art-Net\0");
        assert_eq!(peek_opcode(&bytes).unwrap(), opcode);
    }
}

#[test]
fn standard_packets_carry_version_14() {
    for bytes in [
        ArtPoll::new().encode(),
        ArtIpProg::new().encode(),
        ArtCommand::new("x").unwrap().encode(),
    ] {
        assert_eq!(&bytes[10..12], &[0x00, 0x0e]);
    }
}

#[test]
fn poll_reply_fixture_decodes() {
    let reply = ArtPollReply::decode(&poll_reply_fixture()).unwrap();
    assert_eq!(reply.ip_address, Ipv4Addr::new(10, 0, 0, 42));
    assert_eq!(reply.port, 6454);
    assert_eq!(reply.version_info, 0x0102);
    assert_eq!(reply.oem, 0x0430);
    assert_eq!(reply.esta_manufacturer, 0x7ff0);
    assert_eq!(reply.port_name, "Node1");
    assert_eq!(reply.long_name, "Node One Rev 2");
    assert_eq!(reply.node_report, "#0001 [0042] OK");
    assert_eq!(reply.num_ports, 2);
    assert_eq!(reply.port_types_bytes(), [0x80, 0x80, 0x00, 0x00]);
    assert_eq!(reply.good_output_bytes(), [0x80, 0x00, 0x00, 0x00]);
    assert_eq!(reply.acn_priority, 100);
    assert_eq!(reply.mac.to_string(), "00:1a:2b:3c:4d:5e");
    assert_eq!(reply.bind_ip, Ipv4Addr::new(10, 0, 0, 42));
    assert_eq!(reply.default_response_uid.to_string(), "7f:f0:00:00:00:05");
    assert_eq!(reply.refresh_rate, 44);
}

#[test]
fn poll_reply_round_trips_through_shared_layout() {
    let bytes = poll_reply_fixture();
    let reply = ArtPollReply::decode(&bytes).unwrap();
    assert_eq!(reply.encode(), bytes);
}

#[test]
fn full_width_name_without_terminator() {
    let mut bytes = poll_reply_fixture();
    bytes[layout::poll_reply::PORT_NAME.range()].copy_from_slice(&[b'A'; 18]);
    let reply = ArtPollReply::decode(&bytes).unwrap();
    assert_eq!(reply.port_name, "A".repeat(18));
    assert_eq!(reply.long_name, "Node One Rev 2");
}

#[test]
fn truncated_and_oversized_replies_are_rejected() {
    let bytes = poll_reply_fixture();
    for len in [0, 10, ArtPollReply::WIRE_LEN - 1] {
        assert_eq!(
            ArtPollReply::decode(&bytes[..len]),
            Err(DecodeError::LengthMismatch {
                expected: ArtPollReply::WIRE_LEN,
                actual: len
            })
        );
    }
    let mut long = bytes.clone();
    long.extend_from_slice(&[0; 8]);
    assert!(matches!(
        ArtPollReply::decode(&long),
        Err(DecodeError::LengthMismatch { actual: 247, .. })
    ));
}

#[test]
fn generic_decode_dispatches_replies() {
    let packet = ArtPacket::decode(&poll_reply_fixture()).unwrap();
    assert_eq!(packet.opcode(), OpCode::PollReply);
    assert!(packet.to_string().contains("Node1"));
}

#[test]
fn one_bad_datagram_does_not_affect_the_next() {
    let good = poll_reply_fixture();
    let bad = &good[..100];
    assert!(ArtPacket::decode(bad).is_err());
    assert!(ArtPacket::decode(&good).is_ok());
    assert!(ArtPacket::decode(bad).is_err());
}
