//! Reservation Server - 餐厅预订的桌台与时段分配
//!
//! # 架构概述
//!
//! - **分配引擎** (`allocation`): 纯函数，给定时段配置、桌台和已有预订，
//!   计算可订时段、桌台组合、重新分配和拖放检查
//! - **数据存储** (`db`): 内存数据存储 + 按实体划分的仓储函数
//! - **服务层** (`services`): 在同一事务内完成引擎检查和写入
//! - **HTTP API** (`api`): RESTful 接口
//!
//! # 模块结构
//!
//! ```text
//! reservation-server/src/
//! ├── allocation/    # 区间、时段、桌台池、占用索引、装桌、可订性、重新分配
//! ├── core/          # 配置、状态、服务器
//! ├── db/            # 数据存储和仓储
//! ├── services/      # 预订服务
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志、时间、校验
//! ```

pub mod allocation;
pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use services::BookingService;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ErrorCategory, ErrorCode, ErrorResponse};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境: 加载 .env，初始化日志
///
/// 日志级别和目录取自 [`Config`] (`LOG_LEVEL` / `LOG_DIR`)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env 文件是可选的
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir)?;
    }
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____                                  __  _
   / __ \___  ________  ______   ______ _/ /_(_)___  ____
  / /_/ / _ \/ ___/ _ \/ ___/ | / / __ `/ __/ / __ \/ __ \
 / _, _/  __(__  )  __/ /   | |/ / /_/ / /_/ / /_/ / / / /
/_/ |_|\___/____/\___/_/    |___/\__,_/\__/_/\____/_/ /_/
    "#
    );
}
