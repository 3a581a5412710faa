//! `lexchat check` -- print the resolved configuration.
//!
//! The API key itself is never printed, only whether it is set.

use lexchat_infra::config::resolve_api_key;
use lexchat_types::config::LexConfig;

pub fn run(config: &LexConfig) -> anyhow::Result<()> {
    let has_key = resolve_api_key(config).is_some();

    let check_mark = |ok: bool| {
        if ok {
            format!("{}", console::style("✓").green())
        } else {
            format!("{}", console::style("✗").red())
        }
    };

    println!();
    println!("  {}", console::style("Lex configuration").bold());
    println!();
    println!("  listen          {}:{}", config.host, config.port);
    println!("  model           {}", config.model);
    println!("  base url        {}", config.base_url);
    println!("  web search      {}", config.web_search);
    println!("  thinking budget {}", config.thinking_budget);
    println!("  timeout         {}s", config.request_timeout_secs);
    println!("  session ttl     {}", describe_ttl(config.session_ttl_secs));
    println!("  cookie          {}", config.cookie_name);
    println!(
        "  secret key      {}",
        if config.secret_key.is_some() {
            "configured"
        } else {
            "generated at start"
        }
    );
    println!();
    println!(
        "  {} API key ({}) {}",
        check_mark(has_key),
        config.api_key_env,
        if has_key { "is set" } else { "is not set" }
    );
    println!();

    if !has_key {
        anyhow::bail!("{} is not set", config.api_key_env);
    }
    Ok(())
}

fn describe_ttl(secs: u64) -> String {
    match secs {
        0 => "never expires".to_string(),
        s if s % 86_400 == 0 => format!("{} days", s / 86_400),
        s => format!("{s}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_ttl() {
        assert_eq!(describe_ttl(0), "never expires");
        assert_eq!(describe_ttl(2_678_400), "31 days");
        assert_eq!(describe_ttl(90), "90s");
    }
}
