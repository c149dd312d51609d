use super::*;

fn parse_args(argv: &[&str]) -> Args {
    Args::try_parse_from(argv)
        .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
}

#[test]
fn test_default_command_is_chat() {
    let args = parse_args(&["khet-chat"]);
    assert!(args.command.is_none());
    assert_eq!(args.verbose, 0);
    assert!(args.language.is_none());
}

#[test]
fn test_language_flag_parsing() {
    let cases: [(&[&str], Option<Language>); 3] = [
        (&["khet-chat", "-L", "hi"], Some(Language::Hi)),
        (&["khet-chat", "--language", "en", "chat"], Some(Language::En)),
        (&["khet-chat", "--language", "hi", "say", "hello"], Some(Language::Hi)),
    ];

    for (argv, expected) in cases {
        let args = parse_args(argv);
        assert_eq!(args.language, expected, "argv={argv:?}");
    }
}

#[test]
fn test_unknown_language_is_rejected() {
    let err = Args::try_parse_from(["khet-chat", "-L", "fr"])
        .err()
        .expect("fr should be rejected");
    assert!(err.to_string().contains("unsupported language 'fr'"));
}

#[test]
fn test_say_collects_prompt_words() {
    let args = parse_args(&["khet-chat", "say", "How", "do", "I", "treat", "aphids?"]);
    match args.command {
        Some(Commands::Say { prompt }) => {
            assert_eq!(prompt.join(" "), "How do I treat aphids?");
        }
        _ => panic!("expected say subcommand"),
    }
}

#[test]
fn test_set_accepts_optional_value() {
    let args = parse_args(&["khet-chat", "set", "language"]);
    match args.command {
        Some(Commands::Set { key, value }) => {
            assert_eq!(key, "language");
            assert!(value.is_none());
        }
        _ => panic!("expected set subcommand"),
    }

    let args = parse_args(&["khet-chat", "set", "base-url", "http://10.0.0.2:5000"]);
    match args.command {
        Some(Commands::Set { key, value }) => {
            assert_eq!(key, "base-url");
            assert_eq!(value, Some(vec!["http://10.0.0.2:5000".to_string()]));
        }
        _ => panic!("expected set subcommand"),
    }
}

#[test]
fn test_verbose_counts_and_endpoint_flag() {
    let args = parse_args(&["khet-chat", "-vv", "--endpoint", "http://localhost:9000/chat"]);
    assert_eq!(args.verbose, 2);
    assert_eq!(args.endpoint.as_deref(), Some("http://localhost:9000/chat"));
}

#[test]
fn test_log_target_selection() {
    let cache_log = PathBuf::from("/cache/khet-chat.log");
    assert_eq!(
        log_target(&Commands::Chat, None, Some(cache_log.clone())),
        LogTarget::File(cache_log.clone())
    );
    assert_eq!(log_target(&Commands::Chat, None, None), LogTarget::Disabled);
    assert_eq!(
        log_target(&Commands::Say { prompt: vec![] }, None, Some(cache_log.clone())),
        LogTarget::Stderr
    );
    assert_eq!(
        log_target(&Commands::Chat, Some(PathBuf::from("khet.log")), Some(cache_log)),
        LogTarget::File(PathBuf::from("khet.log"))
    );
}

#[test]
fn test_farm_tool_subcommands() {
    let args = parse_args(&["khet-chat", "weather", "New", "Delhi"]);
    match args.command {
        Some(Commands::Weather { city }) => assert_eq!(city.join(" "), "New Delhi"),
        _ => panic!("expected weather subcommand"),
    }

    let args = parse_args(&[
        "khet-chat", "crop-recommend", "-N", "90", "-P", "42", "-K", "43",
        "--temperature", "20.8", "--humidity", "82", "--ph", "6.5", "--rainfall", "202.9",
    ]);
    match args.command {
        Some(Commands::CropRecommend(readings)) => {
            assert_eq!(readings.nitrogen, 90.0);
            assert_eq!(readings.potassium, 43.0);
            assert_eq!(readings.ph, 6.5);
        }
        _ => panic!("expected crop-recommend subcommand"),
    }

    assert!(
        Args::try_parse_from(["khet-chat", "crop-recommend", "-N", "90"]).is_err(),
        "all readings are required"
    );

    let args = parse_args(&["khet-chat", "disease-detect", "leaf.jpg"]);
    match args.command {
        Some(Commands::DiseaseDetect { image }) => assert_eq!(image, PathBuf::from("leaf.jpg")),
        _ => panic!("expected disease-detect subcommand"),
    }
}

#[test]
fn test_services_use_configured_backend_root() {
    let config = Config {
        base_url: Some("http://10.0.0.2:5000/".to_string()),
        ..Default::default()
    };
    assert_eq!(build_services(&config).base_url(), "http://10.0.0.2:5000/");
}

#[test]
fn test_transport_uses_flag_endpoint() {
    let transport = build_transport(&Config::default(), Some("http://flag.example/api/chat"));
    assert_eq!(transport.endpoint(), "http://flag.example/api/chat");
}
