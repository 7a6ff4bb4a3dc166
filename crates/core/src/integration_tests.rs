//! Integration tests: exercise the full flow against a simulated mouse.
//!
//! Each test parses raw CLI-style tokens, builds the command, and pushes it
//! through the transfer executor over a mock port, asserting the exact byte
//! sequence that would hit the wire.

#[cfg(test)]
mod tests {
    use crate::command::Command;
    use crate::fields::{BlinkRate, Brightness, Color, Dpi, IntroToggle};
    use crate::transfer::{send_command, SendOptions};
    use crate::transport::mock::MockPort;

    #[test]
    fn solid_flow() {
        let mut port = MockPort::new();
        port.queue_ack();

        let color = Color::parse("#2AFF00").unwrap();
        send_command(&mut port, &Command::solid(color), &SendOptions::default()).unwrap();

        assert_eq!(
            port.written_hex(),
            vec!["11ff0e3b00012aff000000000000000000000000"]
        );
    }

    #[test]
    fn cycle_flow_with_defaults() {
        let mut port = MockPort::new();
        port.queue_ack();

        // No rate/brightness tokens: defaults 10000 ms / 100 %.
        let rate = BlinkRate::parse(None).unwrap();
        let brightness = Brightness::parse(None).unwrap();
        send_command(
            &mut port,
            &Command::cycle(rate, brightness),
            &SendOptions::default(),
        )
        .unwrap();

        assert_eq!(
            port.written_hex(),
            vec!["11ff0e3b00020000000000271064000000000000"]
        );
    }

    #[test]
    fn breathe_flow() {
        let mut port = MockPort::new();
        port.queue_ack();

        let color = Color::parse("ff00aa").unwrap();
        let rate = BlinkRate::parse(Some("5000")).unwrap();
        let brightness = Brightness::parse(Some("80")).unwrap();
        send_command(
            &mut port,
            &Command::breathe(color, rate, brightness),
            &SendOptions::default(),
        )
        .unwrap();

        // 5000 ms = 0x1388, 80 % = 0x50
        assert_eq!(
            port.written_hex(),
            vec!["11ff0e3b0003ff00aa1388005000000000000000"]
        );
    }

    #[test]
    fn intro_flow() {
        let mut port = MockPort::new();
        port.queue_ack();

        let toggle = IntroToggle::parse("off").unwrap();
        send_command(&mut port, &Command::intro(toggle), &SendOptions::default()).unwrap();

        assert_eq!(
            port.written_hex(),
            vec!["11ff0e5b00010200000000000000000000000000"]
        );
        assert_eq!(port.writes[0].0, 0x0211);
    }

    #[test]
    fn dpi_flow_bypasses_onboard_memory() {
        let mut port = MockPort::new();
        port.queue_ack();
        port.queue_ack();

        let dpi = Dpi::parse("3200").unwrap();
        let options = SendOptions {
            bypass_onboard_memory: true,
            ..Default::default()
        };
        send_command(&mut port, &Command::dpi(dpi), &options).unwrap();

        // 3200 = 0x0c80
        assert_eq!(
            port.written_hex(),
            vec!["10ff0e5b010305", "10ff0a3b000c80"]
        );
        assert_eq!(port.writes[0].0, 0x0210);
        assert_eq!(port.writes[1].0, 0x0210);
    }

    #[test]
    fn validation_failure_never_touches_the_port() {
        let port = MockPort::new();

        assert!(Color::parse("not-a-color").is_err());
        assert!(Dpi::parse("fast").is_err());
        assert!(IntroToggle::parse("maybe").is_err());

        assert!(port.writes.is_empty());
    }

    #[test]
    fn failed_transfer_stops_the_sequence() {
        let mut port = MockPort::new();
        // Ack the bypass, then let the primary command's ack time out.
        port.queue_ack();

        let dpi = Dpi::parse("800").unwrap();
        let options = SendOptions {
            bypass_onboard_memory: true,
            ..Default::default()
        };
        let result = send_command(&mut port, &Command::dpi(dpi), &options);

        assert!(result.is_err());
        assert_eq!(port.writes.len(), 2);
    }
}
