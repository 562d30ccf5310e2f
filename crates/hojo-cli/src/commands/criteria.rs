//! Criteria command implementation

use anyhow::Result;
use hojo_core::config::{self, BonusDef};

pub fn cmd_criteria() -> Result<()> {
    println!();
    println!("📋 評価基準");
    println!("   ─────────────────────────────────────────────────────────────");

    for def in config::CRITERIA {
        println!();
        println!(
            "   {} ({:.0}点)",
            def.criterion.label(),
            def.criterion.max_score()
        );
        for sub in def.sub_criteria {
            println!("     - {} (重み {:.2})", sub.name, sub.weight);
            println!("       {}", sub.keywords.join(", "));
        }
    }

    println!();
    println!("🎯 基礎審査 (各グループのキーワードが1つ以上必要)");
    for group in config::GATE_GROUPS {
        println!("     - {}: {}", group.name, group.keywords.join(", "));
    }

    print_bonus_table("⭐ 優先政策加点", config::PRIORITY_BONUSES);
    print_bonus_table("⭐ 政策加点", config::POLICY_BONUSES);

    println!();
    Ok(())
}

fn print_bonus_table(title: &str, table: &[BonusDef]) {
    println!();
    println!("{}", title);
    for bonus in table {
        println!(
            "     - {} ({}点): {}",
            bonus.name,
            bonus.points,
            bonus.keywords.join(", ")
        );
    }
}
