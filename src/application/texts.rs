//! Fixed user-facing strings (Arabic with English where operators need it)

pub const PRODUCT_LABEL: &str = "SPX/Options Bot";
pub const DISCLAIMER: &str = "⚠️ التداول مسؤوليتك الشخصية";
pub const SUBSCRIBE_LABEL: &str = "اشترك الآن عبر Salla";

pub const NEWPOST_PLACEHOLDER: &str = "تنبيه صفقة جديدة";
pub const UPDATE_PLACEHOLDER: &str = "تحديث صفقة";
pub const UPDATE_MARKER: &str = "📊 تحديث:";

pub const ADMIN_ONLY: &str = "❌ الأمر للمشرف فقط.";
pub const NEWPOST_DONE: &str = "✅ تم نشر التنبيه في القناة.";
pub const UPDATE_DONE: &str = "✅ تم إرسال التحديث.";
pub const DISPATCH_FAILED: &str = "❌ تعذر الإرسال إلى القناة. حاول مرة أخرى لاحقًا.";
pub const DISPATCH_TIMEOUT: &str =
    "⏳ انتهت مهلة الإرسال إلى القناة. تحقق من القناة قبل إعادة المحاولة.";

pub const HELP_HEADER: &str = "الأوامر المتاحة:";

pub fn welcome(display_name: &str) -> String {
    format!(
        "أهلًا بك في {} 🤖\n\
         بوت تنبيهات عقود SPX/QQQ و أسهم الذكاء الاصطناعي.\n\n\
         للاشتراك في القناة الخاصة: اضغط الزر بالأسفل.",
        display_name
    )
}

pub fn admin_status(caller_id: i64, is_admin: bool) -> String {
    let mut text = format!("🔐 Your user id is: {}\n", caller_id);
    if is_admin {
        text.push_str("✅ Admin verified.");
    } else {
        text.push_str("❌ Not admin. ضع رقمك في ADMIN_USER_ID داخل config.json ثم أعد التشغيل.");
    }
    text
}
