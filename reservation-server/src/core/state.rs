use chrono_tz::Tz;

use crate::core::Config;
use crate::db::MemoryDb;
use crate::services::BookingService;
use crate::utils::time::parse_timezone;

/// 服务器状态 - 持有所有服务的单例引用
///
/// 使用 Arc 实现浅拷贝，每个请求处理器拿到的都是同一个数据存储。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | MemoryDb | 内存数据存储 |
/// | booking | BookingService | 可订时段 / 预订 / 桌台重新分配 |
///
/// # 使用示例
///
/// ```ignore
/// let state = ServerState::initialize(&config);
/// let slots = state.booking.get_available_slots(/* ... */)?;
/// ```
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据存储
    pub db: MemoryDb,
    /// 预订服务
    pub booking: BookingService,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替
    pub fn new(config: Config, db: MemoryDb, booking: BookingService) -> Self {
        Self {
            config,
            db,
            booking,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 解析回退时区 (无法解析时使用 UTC)
    /// 2. 创建空数据存储
    /// 3. 构造服务
    pub fn initialize(config: &Config) -> Self {
        let default_tz = parse_timezone(&config.default_timezone, Tz::UTC);
        let db = MemoryDb::new();
        let booking = BookingService::new(db.clone(), default_tz);

        tracing::info!(
            environment = %config.environment,
            default_timezone = %default_tz,
            "Server state initialized"
        );

        Self::new(config.clone(), db, booking)
    }
}
