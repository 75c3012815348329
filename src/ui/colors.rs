use colored::Colorize;

/// 显示成功消息（绿色 ✓）
pub fn success(msg: &str, colored: bool) {
    if colored {
        println!("{} {}", "✓".green().bold(), msg.green());
    } else {
        println!("✓ {}", msg);
    }
}

/// 显示错误消息（红色 ✗）
pub fn error(msg: &str, colored: bool) {
    eprintln!("{}", format_error(msg, colored));
}

/// 显示警告消息（黄色 ⚠），输出到 stderr
pub fn warning(msg: &str, colored: bool) {
    if colored {
        eprintln!("{} {}", "⚠".yellow().bold(), msg.yellow());
    } else {
        eprintln!("⚠ {}", msg);
    }
}

/// 格式化信息消息（蓝色 ℹ）
pub fn info(msg: &str, colored: bool) -> String {
    if colored {
        format!("{} {}", "ℹ".blue().bold(), msg.blue())
    } else {
        format!("ℹ {}", msg)
    }
}

fn format_error(msg: &str, colored: bool) -> String {
    if colored {
        format!("{} {}", "✗".red().bold(), msg.red())
    } else {
        format!("✗ {}", msg)
    }
}
