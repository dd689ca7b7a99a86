use serde::Serialize;

/// 拨号列表中的一行，`index` 从0开始且不包含表头
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CallRecord {
    pub index: u32,
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl CallRecord {
    /// 由表格的一行生成，姓名和电话都为空时视为空行
    pub fn from_row(index: u32, row: &[String]) -> Option<Self> {
        let cell = |i: usize| row.get(i).map(|v| v.trim().to_string()).unwrap_or_default();
        let name = cell(0);
        let phone = cell(1);
        if name.is_empty() && phone.is_empty() {
            return None;
        }
        let remark = Some(cell(2)).filter(|v| !v.is_empty());
        Some(CallRecord {
            index,
            name,
            phone,
            remark,
        })
    }
}
