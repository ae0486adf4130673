pub const NO_PRODUCTS: &str = "Tidak ada produk ditemukan.";
pub const PRODUCTS_FAILED: &str = "Error memuat produk.";
pub const NO_RECOMMENDATIONS: &str = "Tidak ada rekomendasi ditemukan.";
pub const RECOMMENDATIONS_FAILED: &str = "Error memuat rekomendasi.";
pub const CHAT_FALLBACK: &str = "Maaf, saya belum menemukan jawabannya.";
pub const TYPING: &str = "•••";
pub const WARNING: &str = "Peringatan:";
pub const VIEW_DESCRIPTION: &str = "Lihat Deskripsi";
