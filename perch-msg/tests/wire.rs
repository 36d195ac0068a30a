use perch_msg::*;

fn encode(msg: &Message<'_>) -> Vec<u8> {
  let mut bytes = vec![0u8; msg.size().unwrap()];
  let n = msg.try_into_bytes(&mut bytes).unwrap();
  assert_eq!(n, bytes.len());
  bytes
}

fn response<'a>(ty: Type, payload: &'a [u8]) -> Message<'a> {
  let mut msg = Message { code: Code::new(2, 5),
                          token: Token::try_from_slice(&[0xAB, 0xCD]).unwrap(),
                          payload: Payload(payload),
                          ..Message::new(ty, Id(0xBEEF)) };
  msg.opts.push(Opt { number: CONTENT_FORMAT,
                      value: OptValue(&[0]) });
  msg
}

#[test]
fn roundtrip() {
  let payloads: [&[u8]; 3] = [b"", b"23.5", &[0xFF; 300]];

  for ty in [Type::Con, Type::Non, Type::Ack, Type::Reset] {
    for payload in payloads {
      let msg = response(ty, payload);
      let bytes = encode(&msg);
      assert_eq!(Message::try_from_bytes(&bytes).unwrap(), msg);
    }
  }
}

#[test]
fn extended_lengths() {
  let value = vec![b'v'; 65000];

  for (len, ext) in [(0usize, 0usize), (12, 0), (13, 1), (268, 1), (269, 2), (65000, 2)] {
    let mut msg = Message::new(Type::Con, Id(1));
    msg.opts.push(Opt { number: PATH,
                        value: OptValue(&value[..len]) });

    let bytes = encode(&msg);

    // header, delta of 11 needs no extension bytes, then the length extension
    assert_eq!(bytes.len(), 4 + 1 + ext + len, "length {}", len);

    let parsed = Message::try_from_bytes(&bytes).unwrap();
    assert_eq!(parsed.get(PATH).map(|v| v.len()), Some(len));
  }
}

#[test]
fn extended_deltas() {
  for (number, ext) in [(12u32, 0usize), (13, 1), (268, 1), (269, 2), (65000, 2)] {
    let mut msg = Message::new(Type::Con, Id(1));
    msg.opts.push(Opt { number: OptNumber(number),
                        value: OptValue(b"x") });

    let bytes = encode(&msg);
    assert_eq!(bytes.len(), 4 + 1 + ext + 1, "number {}", number);
    assert_eq!(Message::try_from_bytes(&bytes).unwrap().opts[0].number,
               OptNumber(number));
  }
}

#[test]
fn option_deltas() {
  let mut msg = Message::new(Type::Con, Id(0));
  msg.opts.push(Opt { number: PATH,
                      value: OptValue(b"") });
  msg.opts.push(Opt { number: CONTENT_FORMAT,
                      value: OptValue(b"") });

  assert_eq!(&encode(&msg)[4..], &[0b1011_0000, 0b0001_0000]);

  msg.opts.swap(0, 1);
  let mut buf = [0u8; 32];
  assert_eq!(msg.try_into_bytes(&mut buf),
             Err(MessageToBytesError::InvalidOptionOrder { previous: CONTENT_FORMAT,
                                                           next: PATH }));
}

#[test]
fn truncation() {
  assert!(Message::try_from_bytes(&[0b01_00_0000, 0x01, 0, 0]).is_ok());
  assert_eq!(Message::try_from_bytes(&[0b01_00_0001, 0x01, 0, 0]),
             Err(MessageParseError::TruncatedHeader));
}
